//! Local HTTP server for exercising the downloader and funding providers

use std::io::Read;
use std::thread::{self, JoinHandle};
use tiny_http::{Response, Server};

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: String,
}

/// Serves a fixed script of responses, one per incoming request, then stops
pub struct MockServer {
    pub base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl MockServer {
    /// Start a server that answers the next `responses.len()` requests in order
    pub fn start(responses: Vec<(u16, Vec<u8>)>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();

        let handle = thread::spawn(move || {
            let mut recorded = Vec::new();
            for (status, body) in responses {
                let mut request = server.recv().unwrap();
                let mut content = String::new();
                let _ = request.as_reader().read_to_string(&mut content);
                recorded.push(RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body: content,
                });
                request
                    .respond(Response::from_data(body).with_status_code(status))
                    .unwrap();
            }
            recorded
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            handle,
        }
    }

    /// Wait for every scripted response to be served and return the requests
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().unwrap()
    }
}
