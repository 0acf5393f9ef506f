/// Network adapters: downloads are delegated to an external downloader
mod curl_transport;

pub use curl_transport::{curl_arguments, CurlTransport};
