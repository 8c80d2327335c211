//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for a temp directory holding monitor log files
pub struct LogDirBuilder {
    temp_dir: TempDir,
}

impl LogDirBuilder {
    /// Create a new builder with an empty directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a file inside the directory (whether or not it exists)
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Add a file with raw content
    pub fn with_raw(self, name: &str, content: &str) -> Self {
        fs::write(self.file(name), content).expect("Failed to write log file");
        self
    }

    /// Add a complete monitor log
    pub fn with_log(self, name: &str, log: &LogFileBuilder) -> Self {
        let content = log.to_xml();
        self.with_raw(name, &content)
    }

    /// Add a monitor log that is still being written (no closing wrapper tag)
    pub fn with_open_log(self, name: &str, log: &LogFileBuilder) -> Self {
        let content = log.to_open_xml();
        self.with_raw(name, &content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for LogDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the content of one monitor log
pub struct LogFileBuilder {
    requests: Vec<RequestBuilder>,
}

impl LogFileBuilder {
    pub fn new() -> Self {
        Self { requests: Vec::new() }
    }

    pub fn with_request(mut self, request: RequestBuilder) -> Self {
        self.requests.push(request);
        self
    }

    /// Document with the closing `</Requests>` tag
    pub fn to_xml(&self) -> String {
        format!("{}</Requests>\n", self.to_open_xml())
    }

    /// Document as the monitor leaves it while the log is still open
    pub fn to_open_xml(&self) -> String {
        let body: String = self.requests.iter().map(RequestBuilder::to_xml).collect();
        format!("<Requests>{}", body)
    }
}

impl Default for LogFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `<Request>` element, pre-filled like a typical WMS GetMap
pub struct RequestBuilder {
    id: Option<String>,
    fields: Vec<(String, String)>,
}

impl RequestBuilder {
    /// Create a successful WMS request with the given id attribute text
    pub fn new(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            fields: vec![
                ("Service".to_string(), "WMS".to_string()),
                ("Version".to_string(), "1.3.0".to_string()),
                ("Operation".to_string(), "GetMap".to_string()),
                ("SubOperation".to_string(), String::new()),
                ("Resources".to_string(), "topp:states".to_string()),
                ("Path".to_string(), "/topp/wms".to_string()),
                ("HttpMethod".to_string(), "GET".to_string()),
                ("StartTime".to_string(), "2024-11-05T07:38:20.782Z".to_string()),
                ("EndTime".to_string(), "2024-11-05T07:38:21.662Z".to_string()),
                ("TotalTime".to_string(), "880".to_string()),
                ("RemoteAddr".to_string(), "12.34.56.78".to_string()),
                ("Host".to_string(), "maps.example.com".to_string()),
                ("RemoteUser".to_string(), "anonymous".to_string()),
                ("ResponseStatus".to_string(), "200".to_string()),
                ("ResponseLength".to_string(), "8677".to_string()),
                ("ResponseContentType".to_string(), "image/png".to_string()),
                ("Failed".to_string(), "false".to_string()),
            ],
        }
    }

    /// Create a request element without an id attribute
    pub fn without_id() -> Self {
        Self { id: None, ..Self::new("0") }
    }

    /// Set (or add) a child element
    pub fn field(mut self, name: &str, value: &str) -> Self {
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
        self
    }

    /// Drop a child element entirely
    pub fn without(mut self, name: &str) -> Self {
        self.fields.retain(|(key, _)| key != name);
        self
    }

    pub fn service(self, service: &str, version: &str) -> Self {
        self.field("Service", service).field("Version", version)
    }

    pub fn failed(self, failed: bool) -> Self {
        self.field("Failed", if failed { "true" } else { "false" })
    }

    pub fn resources(self, resources: &str) -> Self {
        self.field("Resources", resources)
    }

    pub fn user(self, user: &str) -> Self {
        self.field("RemoteUser", user)
    }

    /// Convert to an XML element (values are escaped)
    pub fn to_xml(&self) -> String {
        let id_attr = self.id.as_ref().map(|id| format!(r#" id="{}""#, escape(id))).unwrap_or_default();
        let children: String = self
            .fields
            .iter()
            .map(|(name, value)| format!("\n   <{name}>{}</{name}>", escape(value)))
            .collect();

        format!("<Request{}>{}\n</Request>\n", id_attr, children)
    }
}

fn escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Two overlapping sources: A holds ids {1, 2}, B holds ids {2, 3} and rewrites 2
pub fn overlapping_sources() -> (TempDir, PathBuf, PathBuf) {
    let source_a = LogFileBuilder::new()
        .with_request(RequestBuilder::new("1").failed(true).user("alice").resources("ws1:a"))
        .with_request(
            RequestBuilder::new("2").service("WFS", "2.0.0").user("alice").resources("ws1:old"),
        );
    let source_b = LogFileBuilder::new()
        .with_request(RequestBuilder::new("2").user("bob").resources("ws1:a, ws2:b"))
        .with_request(RequestBuilder::new("3").user("bob").resources(""));

    let dir = LogDirBuilder::new().with_log("a.log", &source_a).with_open_log("b.log", &source_b);
    let a = dir.file("a.log");
    let b = dir.file("b.log");
    (dir.build(), a, b)
}
