use crate::{error::Result, records::HostInfo, xml::Element};

use super::{parse_single, set, FromElement};

impl FromElement for HostInfo {
    const TAG: &'static str = "host_info";

    fn from_element(element: &Element) -> Self {
        let mut host = Self::default();
        for child in element.children() {
            match child.name() {
                "timezone" => set(&mut host.timezone, child.int()),
                "domain_name" => host.domain_name = child.string(),
                "ip_addr" => host.ip_addr = child.string(),
                "host_cpid" => host.host_cpid = child.string(),
                "p_ncpus" => set(&mut host.p_ncpus, child.int()),
                "p_vendor" => host.p_vendor = child.string(),
                "p_model" => host.p_model = child.string(),
                "p_features" => host.p_features = child.string(),
                "p_fpops" => set(&mut host.p_fpops, child.double()),
                "p_iops" => set(&mut host.p_iops, child.double()),
                "p_membw" => set(&mut host.p_membw, child.double()),
                "p_calculated" => set(&mut host.p_calculated, child.double()),
                "product_name" => host.product_name = child.string(),
                "m_nbytes" => set(&mut host.m_nbytes, child.double()),
                "m_cache" => set(&mut host.m_cache, child.double()),
                "m_swap" => set(&mut host.m_swap, child.double()),
                "d_total" => set(&mut host.d_total, child.double()),
                "d_free" => set(&mut host.d_free, child.double()),
                "os_name" => host.os_name = child.string(),
                "os_version" => host.os_version = child.string(),
                "virtualbox_version" => host.virtualbox_version = child.string(),
                _ => {}
            }
        }
        host
    }
}

/// Parses the reply to `get_host_info`.
///
/// # Errors
///
/// See the [module documentation](super).
pub fn parse_host_info(xml: &str) -> Result<HostInfo> {
    parse_single(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    #[test]
    fn host_info() {
        let host = parse_host_info(
            "<boinc_gui_rpc_reply>
<host_info>
    <timezone>7200</timezone>
    <domain_name>android-phone</domain_name>
    <ip_addr>192.168.1.20</ip_addr>
    <host_cpid>6a0b3c0f21d1c2b6e5f2f1e0d9c8b7a6</host_cpid>
    <p_ncpus>4</p_ncpus>
    <p_vendor>ARM</p_vendor>
    <p_model>ARMv7 Processor rev 0 (v7l)</p_model>
    <p_features>swp half thumb fastmult vfp edsp neon vfpv3 tls</p_features>
    <p_fpops>574365678.343412</p_fpops>
    <p_iops>1713587982.159231</p_iops>
    <p_membw>1000000000.000000</p_membw>
    <p_calculated>1370000000.000000</p_calculated>
    <m_nbytes>1945194496.000000</m_nbytes>
    <m_cache>-1.000000</m_cache>
    <m_swap>0.000000</m_swap>
    <d_total>5418860544.000000</d_total>
    <d_free>oops</d_free>
    <os_name>Android</os_name>
    <os_version>Linux Version 3.4.0</os_version>
</host_info>
</boinc_gui_rpc_reply>",
        )
        .unwrap();
        assert_eq!(7200, host.timezone);
        assert_eq!("android-phone", host.domain_name);
        assert_eq!("192.168.1.20", host.ip_addr);
        assert_eq!(4, host.p_ncpus);
        assert_eq!("ARMv7 Processor rev 0 (v7l)", host.p_model);
        assert_eq!(574_365_678.343_412, host.p_fpops);
        assert_eq!(1e9, host.p_membw);
        assert_eq!(-1.0, host.m_cache);
        assert_eq!(5_418_860_544.0, host.d_total);
        assert_eq!(0.0, host.d_free);
        assert_eq!("Android", host.os_name);
        assert_eq!("Linux Version 3.4.0", host.os_version);
        assert_eq!("", host.virtualbox_version);
    }

    #[test]
    fn missing_host_info() {
        assert!(matches!(
            parse_host_info("<boinc_gui_rpc_reply></boinc_gui_rpc_reply>"),
            Err(Error::MissingElement("host_info"))
        ));
    }
}
