use crate::{error::Result, records::Transfer, xml::Element};

use super::{is_blank, parse_list, set, FromElement};

impl Transfer {
    fn read_persistent_xfer(&mut self, element: &Element) {
        for child in element.children() {
            match child.name() {
                "num_retries" => set(&mut self.num_retries, child.int()),
                "first_request_time" => set(&mut self.first_request_time, child.truncated()),
                "next_request_time" => set(&mut self.next_request_time, child.truncated()),
                "time_so_far" => set(&mut self.time_so_far, child.double()),
                "last_bytes_xferred" => set(&mut self.last_bytes_xferred, child.double()),
                "is_upload" => self.is_upload = child.flag(),
                _ => {}
            }
        }
    }

    fn read_xfer(&mut self, element: &Element) {
        self.xfer_active = true;
        for child in element.children() {
            match child.name() {
                "bytes_xferred" => set(&mut self.bytes_xferred, child.double()),
                "file_offset" => set(&mut self.file_offset, child.double()),
                "xfer_speed" => set(&mut self.xfer_speed, child.double()),
                "url" => self.url = child.string(),
                _ => {}
            }
        }
    }
}

impl FromElement for Transfer {
    const TAG: &'static str = "file_transfer";

    fn from_element(element: &Element) -> Self {
        let mut transfer = Self::default();
        for child in element.children() {
            match child.name() {
                "name" => transfer.name = child.string(),
                "project_url" => transfer.project_url = child.string(),
                "project_name" => transfer.project_name = child.string(),
                "nbytes" => set(&mut transfer.nbytes, child.double()),
                "status" => set(&mut transfer.status, child.int()),
                "generated_locally" => transfer.generated_locally = child.flag(),
                "is_upload" => transfer.is_upload = child.flag(),
                "project_backoff" => set(&mut transfer.project_backoff, child.double()),
                "persistent_file_xfer" => transfer.read_persistent_xfer(child),
                "file_xfer" => transfer.read_xfer(child),
                _ => {}
            }
        }
        transfer
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.name)
    }
}

/// Parses the reply to `get_file_transfers`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_transfers(xml: &str) -> Result<Vec<Transfer>> {
    parse_list(xml)
}
