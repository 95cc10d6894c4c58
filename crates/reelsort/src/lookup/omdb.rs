use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::LookupError;
use crate::lookup::MetadataLookup;
use crate::title::TitleYear;

/// Client for the Open Movie Database title search.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl OmdbClient {
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: SecretString::from(api_key.expose_secret()),
        })
    }

    /// Queries OMDb for `title`. `Ok(None)` means the service answered but
    /// found nothing usable.
    pub fn fetch(&self, title: &str) -> Result<Option<TitleYear>, LookupError> {
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("t", title),
                ("plot", "short"),
                ("r", "json"),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()?
            .error_for_status()?
            .text()?;

        parse_response(&body)
    }
}

impl MetadataLookup for OmdbClient {
    fn lookup(&self, title: &str) -> Option<TitleYear> {
        debug!("OMDb - searching for year of {}", title);
        match self.fetch(title) {
            Ok(Some(found)) => {
                debug!("OMDb - I think I found it! It's {}", found.canonical_name());
                Some(found)
            }
            Ok(None) => {
                debug!("OMDb - no suggestions for {}", title);
                None
            }
            Err(e) => {
                warn!("OMDb lookup for {} failed: {}", title, e);
                None
            }
        }
    }
}

fn parse_response(body: &str) -> Result<Option<TitleYear>, LookupError> {
    let response: OmdbResponse =
        serde_json::from_str(body).map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

    if response.response != "True" {
        if let Some(error) = response.error {
            debug!("OMDb - {}", error);
        }
        return Ok(None);
    }

    let title = response.title.unwrap_or_default();
    let year = response.year.as_deref().and_then(leading_year);

    match year {
        Some(year) if !title.trim().is_empty() => Ok(Some(TitleYear::new(title, year))),
        _ => Ok(None),
    }
}

/// `"1999"` and `"2005–2010"` both yield the first four digits.
fn leading_year(year: &str) -> Option<String> {
    let digits: String = year.chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serves one canned HTTP response and reports the request line.
    fn serve_once(body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(request_line).unwrap();
        });

        (format!("http://{}/", addr), rx)
    }

    fn client(base_url: &str) -> OmdbClient {
        OmdbClient::new(
            base_url,
            &SecretString::from("test-key"),
            Duration::from_secs(2),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_successful_response() {
        let body = r#"{"Title":"The Matrix","Year":"1999","Response":"True"}"#;
        assert_eq!(
            parse_response(body).unwrap(),
            Some(TitleYear::new("The Matrix", "1999"))
        );
    }

    #[test]
    fn test_parse_not_found_response() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        assert_eq!(parse_response(body).unwrap(), None);
    }

    #[test]
    fn test_parse_series_year_range() {
        let body = r#"{"Title":"Lost","Year":"2004–2010","Response":"True"}"#;
        assert_eq!(
            parse_response(body).unwrap(),
            Some(TitleYear::new("Lost", "2004"))
        );
    }

    #[test]
    fn test_parse_missing_fields_is_no_match() {
        assert_eq!(parse_response(r#"{"Response":"True"}"#).unwrap(), None);
        assert_eq!(
            parse_response(r#"{"Title":"","Year":"1999","Response":"True"}"#).unwrap(),
            None
        );
        assert_eq!(
            parse_response(r#"{"Title":"X","Year":"N/A","Response":"True"}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_lookup_against_local_server() {
        let (base_url, requests) =
            serve_once(r#"{"Title":"Aladdin","Year":"1992","Response":"True"}"#);

        let found = client(&base_url).lookup("Aladdin");
        assert_eq!(found, Some(TitleYear::new("Aladdin", "1992")));

        let request_line = requests.recv().unwrap();
        assert!(request_line.starts_with("GET /?"));
        assert!(request_line.contains("t=Aladdin"));
        assert!(request_line.contains("apikey=test-key"));
    }

    #[test]
    fn test_lookup_unreachable_server_is_none() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert_eq!(client(&format!("http://{}/", addr)).lookup("Aladdin"), None);
    }
}
