//! Remote CSV export download.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{DashboardError, Result};


/// Download the CSV export at `url` in a single blocking GET.
///
/// There is no retry: a transport failure or a non-success status ends the load.
pub fn fetch_csv(url: &str, timeout: Duration) -> Result<String> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| fetch_error(url, source))?;

    download(&client, url)
}


fn download(client: &Client, url: &str) -> Result<String> {
    info!(%url, "fetching complaints export");

    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|source| fetch_error(url, source))?;

    debug!(bytes = body.len(), "downloaded complaints export");
    Ok(body)
}


fn fetch_error(url: &str, source: reqwest::Error) -> DashboardError {
    DashboardError::Fetch {
        url: url.to_string(),
        source,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_parser::parse_csv;
    use std::io::{ErrorKind, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    const FIXTURE: &str = include_str!("../../tests/fixtures/complaints.csv");

    /// Answer exactly one request with `status` and `body`, then hand the
    /// listener back so the caller can check nobody connected again.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<TcpListener>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/export.csv", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            listener
        });

        (url, handle)
    }

    fn assert_no_second_request(listener: TcpListener) {
        listener.set_nonblocking(true).unwrap();
        match listener.accept() {
            Err(e) => assert_eq!(e.kind(), ErrorKind::WouldBlock),
            Ok(_) => panic!("export was requested more than once"),
        }
    }

    fn local_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap()
    }

    #[test]
    fn test_server_error_is_fetch_error_without_retry() {
        let (url, server) = serve_once("500 Internal Server Error", "boom");

        let err = download(&local_client(), &url).unwrap_err();
        match err {
            DashboardError::Fetch { url: failed, source } => {
                assert_eq!(failed, url);
                assert_eq!(source.status().map(|s| s.as_u16()), Some(500));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }

        assert_no_second_request(server.join().unwrap());
    }

    #[test]
    fn test_success_returns_csv_body() {
        let (url, server) = serve_once("200 OK", FIXTURE);

        let body = download(&local_client(), &url).unwrap();
        assert_eq!(body, FIXTURE);

        let records = parse_csv(&body).unwrap();
        assert_eq!(records.len(), 5);

        assert_no_second_request(server.join().unwrap());
    }

    #[test]
    fn test_refused_connection_is_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/export.csv", listener.local_addr().unwrap());
        drop(listener);

        let err = fetch_csv(&url, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, DashboardError::Fetch { .. }));
        assert!(err.to_string().starts_with(&format!("failed to fetch {url}")));
    }
}
