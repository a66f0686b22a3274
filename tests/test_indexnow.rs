use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use larder::indexnow::*;

/// Answer a single request with `status` and `body`. The handle yields the
/// raw request.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/indexnow", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request).to_ascii_lowercase();
            let Some(end) = text.find("\r\n\r\n") else {
                continue;
            };
            let head = &text[..end];
            let done = if head.contains("transfer-encoding: chunked") {
                text.ends_with("0\r\n\r\n")
            } else {
                let length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                request.len() >= end + 4 + length
            };
            if done {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });
    (endpoint, handle)
}

fn one_url() -> Submission {
    Submission::new(
        "wattspet.com",
        "abcd1234",
        "https://wattspet.com/abcd1234.txt",
        &["https://wattspet.com/blog/kelp.html".to_string()],
    )
}

#[test]
fn test_submission_dedupes_and_serializes_camel_case() {
    let urls = vec![
        "https://wattspet.com/a/".to_string(),
        "https://wattspet.com/b/".to_string(),
        "https://wattspet.com/a/".to_string(),
    ];
    let sub = Submission::for_site("https://wattspet.com/", "wattspet.com", "abcd1234", &urls);
    assert_eq!(sub.url_list, ["https://wattspet.com/a/", "https://wattspet.com/b/"]);
    assert_eq!(sub.key_location, "https://wattspet.com/abcd1234.txt");

    let json = serde_json::to_value(&sub).unwrap();
    assert_eq!(json["host"], "wattspet.com");
    assert_eq!(json["keyLocation"], "https://wattspet.com/abcd1234.txt");
    assert_eq!(json["urlList"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_key_validation() {
    assert!(is_valid_key("0f3c9e2a7b5d4c1e"));
    assert!(!is_valid_key("short"));
    assert!(!is_valid_key("has space in it"));
}

#[test]
fn test_read_key_requires_matching_name() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("0f3c9e2a7b5d4c1e.txt");
    fs::write(&good, "0f3c9e2a7b5d4c1e\n").unwrap();
    assert_eq!(read_key(&good).unwrap(), "0f3c9e2a7b5d4c1e");

    let bad = dir.path().join("indexnow.txt");
    fs::write(&bad, "0f3c9e2a7b5d4c1e").unwrap();
    assert!(read_key(&bad).is_err());
}

#[test]
fn test_find_key_file_ignores_other_txt() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("robots.txt"), "User-agent: *").unwrap();
    assert!(find_key_file(dir.path()).is_none());

    fs::write(dir.path().join("0f3c9e2a7b5d4c1e.txt"), "0f3c9e2a7b5d4c1e").unwrap();
    assert_eq!(find_key_file(dir.path()), Some(dir.path().join("0f3c9e2a7b5d4c1e.txt")));
}

#[test]
fn test_empty_submission_is_rejected_before_sending() {
    let sub = Submission::new("wattspet.com", "abcd1234", "https://wattspet.com/abcd1234.txt", &[]);
    assert!(matches!(submit("http://127.0.0.1:9/indexnow", &sub), Err(SubmitError::Empty)));
}

#[test]
fn test_submit_accepted_posts_json() {
    let (endpoint, server) = serve_once("202 Accepted", "");
    assert_eq!(submit(&endpoint, &one_url()).unwrap(), 202);

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /indexnow HTTP/1.1"));
    assert!(request.contains(r#""keyLocation":"https://wattspet.com/abcd1234.txt""#));
    assert!(request.contains(r#""urlList":["https://wattspet.com/blog/kelp.html"]"#));
}

#[test]
fn test_submit_ok_status() {
    let (endpoint, server) = serve_once("200 OK", "");
    assert_eq!(submit(&endpoint, &one_url()).unwrap(), 200);
    server.join().unwrap();
}

#[test]
fn test_submit_forbidden_is_rejected_with_body() {
    let (endpoint, server) = serve_once("403 Forbidden", "key not valid");
    let result = submit(&endpoint, &one_url());
    server.join().unwrap();
    match result {
        Err(SubmitError::Rejected { status, body }) => {
            assert_eq!(status, 403);
            assert_eq!(body, "key not valid");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}
