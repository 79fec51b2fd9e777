use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// the api is never exposed beyond the local machine
pub fn get_loopback_addr(port: u16) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
}

pub fn get_editor_url(addr: &SocketAddr) -> String {
    format!("http://localhost:{}/", addr.port())
}
