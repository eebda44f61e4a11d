//! `http://` / `https://` transport on libcurl.
//!
//! Bodies are spooled to an anonymous temp file before the reader is handed
//! out, so transforms see a plain `Read` and memory stays bounded.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::str;
use std::time::Duration;

use super::{
    ContentSource, ExternalResourceName, LocalResource, ResourceContent, ResourceError,
    ResourceMetaData,
};

/// Connection settings shared by every request of a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Abort when slower than this many bytes/sec for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub max_redirects: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(3600),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            max_redirects: 10,
        }
    }
}

/// Statuses that mean "nothing at this location" rather than failure.
fn is_absent(code: u32) -> bool {
    code == 404 || code == 410
}

fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

/// Resource reached over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpResource {
    name: ExternalResourceName,
    options: HttpOptions,
}

/// Headers of the final response, plus its status.
struct Response {
    code: u32,
    headers: Vec<String>,
}

impl HttpResource {
    pub fn new(name: ExternalResourceName, options: HttpOptions) -> Result<Self, ResourceError> {
        match name.uri().scheme() {
            "http" | "https" => Ok(Self { name, options }),
            other => Err(ResourceError::UnsupportedScheme {
                location: name.location().to_string(),
                scheme: other.to_string(),
            }),
        }
    }

    fn location(&self) -> &str {
        self.name.location()
    }

    fn curl_error(&self) -> impl Fn(curl::Error) -> ResourceError + '_ {
        move |e| ResourceError::transport(self.location(), e)
    }

    fn easy(&self) -> Result<curl::easy::Easy, ResourceError> {
        let o = &self.options;
        let mut easy = curl::easy::Easy::new();
        easy.url(self.location()).map_err(self.curl_error())?;
        easy.follow_location(true).map_err(self.curl_error())?;
        easy.max_redirections(o.max_redirects).map_err(self.curl_error())?;
        easy.connect_timeout(o.connect_timeout).map_err(self.curl_error())?;
        easy.timeout(o.timeout).map_err(self.curl_error())?;
        easy.low_speed_limit(o.low_speed_limit).map_err(self.curl_error())?;
        easy.low_speed_time(o.low_speed_time).map_err(self.curl_error())?;
        Ok(easy)
    }

    /// Run the transfer, collecting the final response's headers and
    /// streaming any body into `sink`.
    fn perform(
        &self,
        easy: &mut curl::easy::Easy,
        mut sink: Option<&mut File>,
        mut upload: Option<&mut dyn Read>,
    ) -> Result<Response, ResourceError> {
        let mut headers: Vec<String> = Vec::new();
        let mut sink_error: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(line) = str::from_utf8(data) {
                        let line = line.trim_end();
                        // A new status line starts the headers of a redirect target.
                        if line.starts_with("HTTP/") {
                            headers.clear();
                        }
                        if !line.is_empty() {
                            headers.push(line.to_string());
                        }
                    }
                    true
                })
                .map_err(self.curl_error())?;
            transfer
                .write_function(|data| match sink.as_mut() {
                    Some(file) => match file.write_all(data) {
                        Ok(()) => Ok(data.len()),
                        Err(e) => {
                            sink_error = Some(e);
                            Ok(0)
                        }
                    },
                    None => Ok(data.len()),
                })
                .map_err(self.curl_error())?;
            if upload.is_some() {
                transfer
                    .read_function(|buf| match upload.as_mut() {
                        Some(reader) => reader
                            .read(buf)
                            .map_err(|_| curl::easy::ReadError::Abort),
                        None => Ok(0),
                    })
                    .map_err(self.curl_error())?;
            }
            transfer.perform()
        };
        if let Some(e) = sink_error {
            return Err(ResourceError::io(self.location(), e));
        }
        performed.map_err(self.curl_error())?;
        let code = easy.response_code().map_err(self.curl_error())?;
        Ok(Response { code, headers })
    }
}

impl ContentSource for HttpResource {
    fn name(&self) -> &ExternalResourceName {
        &self.name
    }

    fn read_metadata(&self) -> Result<Option<ResourceMetaData>, ResourceError> {
        let mut easy = self.easy()?;
        easy.nobody(true).map_err(self.curl_error())?;
        let response = self.perform(&mut easy, None, None)?;
        if is_absent(response.code) {
            return Ok(None);
        }
        if !is_success(response.code) {
            return Err(ResourceError::Http {
                location: self.location().to_string(),
                status: response.code,
            });
        }
        Ok(Some(ResourceMetaData::from_headers(
            self.name.uri().clone(),
            &response.headers,
        )))
    }

    /// HTTP repositories are not enumerable here.
    fn list_entries(&self) -> Result<Option<Vec<String>>, ResourceError> {
        Ok(None)
    }

    fn upload(&self, source: &dyn LocalResource) -> Result<(), ResourceError> {
        let length = source
            .content_length()
            .map_err(|e| ResourceError::io(source.display_name(), e))?;
        let mut reader = source
            .open()
            .map_err(|e| ResourceError::io(source.display_name(), e))?;
        let mut easy = self.easy()?;
        easy.upload(true).map_err(self.curl_error())?;
        easy.in_filesize(length).map_err(self.curl_error())?;
        let response = self.perform(&mut easy, None, Some(&mut *reader))?;
        if !is_success(response.code) {
            return Err(ResourceError::Http {
                location: self.location().to_string(),
                status: response.code,
            });
        }
        tracing::debug!(to = %self.location(), bytes = length, "uploaded");
        Ok(())
    }

    fn open_content(&self) -> Result<Option<ResourceContent>, ResourceError> {
        let mut body = tempfile::tempfile().map_err(|e| ResourceError::io(self.location(), e))?;
        let mut easy = self.easy()?;
        let response = self.perform(&mut easy, Some(&mut body), None)?;
        if is_absent(response.code) {
            tracing::debug!(location = %self.location(), status = response.code, "resource absent");
            return Ok(None);
        }
        if !is_success(response.code) {
            return Err(ResourceError::Http {
                location: self.location().to_string(),
                status: response.code,
            });
        }
        body.seek(SeekFrom::Start(0))
            .map_err(|e| ResourceError::io(self.location(), e))?;
        Ok(Some(ResourceContent {
            reader: Box::new(body),
            metadata: ResourceMetaData::from_headers(self.name.uri().clone(), &response.headers),
        }))
    }
}
