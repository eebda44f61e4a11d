//! Picks a transport for a resource name by URI scheme.

use super::{
    ContentSource, ExternalResourceName, FileResource, HttpOptions, HttpResource,
    InstrumentedResource, LocalResource, ResourceContent, ResourceError, ResourceMetaData,
};
use crate::operation::OperationRunner;

/// Any of the built-in transports.
#[derive(Debug, Clone)]
pub enum AnyResource {
    File(FileResource),
    Http(HttpResource),
}

impl ContentSource for AnyResource {
    fn name(&self) -> &ExternalResourceName {
        match self {
            AnyResource::File(r) => r.name(),
            AnyResource::Http(r) => r.name(),
        }
    }

    fn read_metadata(&self) -> Result<Option<ResourceMetaData>, ResourceError> {
        match self {
            AnyResource::File(r) => r.read_metadata(),
            AnyResource::Http(r) => r.read_metadata(),
        }
    }

    fn list_entries(&self) -> Result<Option<Vec<String>>, ResourceError> {
        match self {
            AnyResource::File(r) => r.list_entries(),
            AnyResource::Http(r) => r.list_entries(),
        }
    }

    fn upload(&self, source: &dyn LocalResource) -> Result<(), ResourceError> {
        match self {
            AnyResource::File(r) => r.upload(source),
            AnyResource::Http(r) => r.upload(source),
        }
    }

    fn open_content(&self) -> Result<Option<ResourceContent>, ResourceError> {
        match self {
            AnyResource::File(r) => r.open_content(),
            AnyResource::Http(r) => r.open_content(),
        }
    }
}

/// Opens resources by name with shared transport settings.
#[derive(Debug, Clone, Default)]
pub struct ResourceConnector {
    http: HttpOptions,
}

impl ResourceConnector {
    pub fn new(http: HttpOptions) -> Self {
        Self { http }
    }

    pub fn open(&self, name: &ExternalResourceName) -> Result<AnyResource, ResourceError> {
        match name.uri().scheme() {
            "file" => FileResource::new(name.clone()).map(AnyResource::File),
            "http" | "https" => HttpResource::new(name.clone(), self.http).map(AnyResource::Http),
            other => Err(ResourceError::UnsupportedScheme {
                location: name.location().to_string(),
                scheme: other.to_string(),
            }),
        }
    }

    /// Open `name` wrapped so every read runs in an operation scope on `runner`.
    pub fn open_instrumented<X: OperationRunner>(
        &self,
        name: &ExternalResourceName,
        runner: X,
    ) -> Result<InstrumentedResource<AnyResource, X>, ResourceError> {
        let resource = self.open(name)?;
        Ok(InstrumentedResource::new(name.clone(), runner, resource))
    }
}
