//! `boinc_rpc` talks to the [BOINC][boinc] core client over its GUI RPC
//! protocol and turns the XML replies into plain data records.
//!
//! # Usage
//!
//! The parsers in [`parse`] accept the text of one reply and return the
//! records it describes. They do not need a connection, so replies captured
//! elsewhere can be read as well.
//!
//! With the `client` feature (enabled by default), [`request`] builds the
//! request documents and [`client::RpcClient`] sends them over any
//! `Read + Write` stream, usually a TCP connection to port 31416.
//!
//! # Examples
//!
//! ```
//! use boinc_rpc::parse::parse_projects;
//!
//! let projects = parse_projects(
//!     "<projects>
//!         <project>
//!             <master_url>http://einstein.phys.uwm.edu/</master_url>
//!             <project_name>Einstein@Home</project_name>
//!             <gui_urls>
//!                 <gui_url>
//!                     <name>Account</name>
//!                     <url>http://einstein.phys.uwm.edu/home.php</url>
//!                 </gui_url>
//!             </gui_urls>
//!         </project>
//!         <project>
//!             <project_name>No master URL</project_name>
//!         </project>
//!     </projects>",
//! )?;
//!
//! // Records without their key are dropped.
//! assert_eq!(1, projects.len());
//! assert_eq!("Einstein@Home", projects[0].project_name);
//! assert_eq!("Account", projects[0].gui_urls[0].name);
//! # Ok::<(), boinc_rpc::Error>(())
//! ```
//!
//! # Lenient field values
//!
//! The replies are parsed leniently. A number which does not parse leaves
//! its field at the default, and a record missing its key field (a project
//! without `master_url`, a task without `name`) is left out of the list. Only
//! a reply which is empty or not a well-formed document is an [`Error`].
//!
//! [boinc]: https://boinc.berkeley.edu/

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub(crate) mod bytes;
#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod client;
mod error;
pub mod parse;
pub mod records;
#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod request;
pub mod xml;

pub use error::{Error, Result};
pub use records::*;
