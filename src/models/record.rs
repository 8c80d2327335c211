use std::fmt;

/// Named attributes carried by every monitor request record.
///
/// The declaration order is the column order of the CSV export, so variants must
/// never be reordered. `Field::ALL` and the discriminants are kept in sync by
/// `test_field_all_matches_discriminants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Service,
    Version,
    Operation,
    SubOperation,
    Resources,
    ResourcesProcessingTime,
    LabelsProcessingTime,
    Path,
    QueryString,
    Body,
    HttpMethod,
    StartTime,
    EndTime,
    TotalTime,
    RemoteAddr,
    RemoteHost,
    Host,
    RemoteUser,
    ResponseStatus,
    ResponseLength,
    ResponseContentType,
    CacheResult,
    MissReason,
    Failed,
}

impl Field {
    pub const COUNT: usize = 24;

    pub const ALL: [Field; Field::COUNT] = [
        Field::Service,
        Field::Version,
        Field::Operation,
        Field::SubOperation,
        Field::Resources,
        Field::ResourcesProcessingTime,
        Field::LabelsProcessingTime,
        Field::Path,
        Field::QueryString,
        Field::Body,
        Field::HttpMethod,
        Field::StartTime,
        Field::EndTime,
        Field::TotalTime,
        Field::RemoteAddr,
        Field::RemoteHost,
        Field::Host,
        Field::RemoteUser,
        Field::ResponseStatus,
        Field::ResponseLength,
        Field::ResponseContentType,
        Field::CacheResult,
        Field::MissReason,
        Field::Failed,
    ];

    /// Element name used in the monitor log (and as the CSV column header)
    pub fn name(self) -> &'static str {
        match self {
            Field::Service => "Service",
            Field::Version => "Version",
            Field::Operation => "Operation",
            Field::SubOperation => "SubOperation",
            Field::Resources => "Resources",
            Field::ResourcesProcessingTime => "ResourcesProcessingTime",
            Field::LabelsProcessingTime => "LabelsProcessingTime",
            Field::Path => "Path",
            Field::QueryString => "QueryString",
            Field::Body => "Body",
            Field::HttpMethod => "HttpMethod",
            Field::StartTime => "StartTime",
            Field::EndTime => "EndTime",
            Field::TotalTime => "TotalTime",
            Field::RemoteAddr => "RemoteAddr",
            Field::RemoteHost => "RemoteHost",
            Field::Host => "Host",
            Field::RemoteUser => "RemoteUser",
            Field::ResponseStatus => "ResponseStatus",
            Field::ResponseLength => "ResponseLength",
            Field::ResponseContentType => "ResponseContentType",
            Field::CacheResult => "CacheResult",
            Field::MissReason => "MissReason",
            Field::Failed => "Failed",
        }
    }

    /// Look up a field by its element name. Unknown elements return `None`.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One served request, keyed by the monitor's request id.
///
/// Every field is always present; an element missing from the log reads as the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub id: u64,
    fields: [String; Field::COUNT],
}

impl LogRecord {
    /// Create a record with every field empty
    pub fn new(id: u64) -> Self {
        Self { id, fields: std::array::from_fn(|_| String::new()) }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.fields[field.slot()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields[field.slot()] = value.into();
    }

    /// Builder-style variant of [`LogRecord::set`]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Field values in column order
    pub fn values(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// `Some(true)`/`Some(false)` for the literal `Failed` values, `None` otherwise
    pub fn failed(&self) -> Option<bool> {
        match self.get(Field::Failed) {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}
