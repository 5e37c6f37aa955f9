//! Shared application state.

use std::sync::Arc;

use courier_application::ports::{Clock, HttpClientError};
use courier_application::{
    CollectionService, EnvironmentService, ExecuteRequest, ExportCollection, HistoryService,
    ImportCollection,
};
use courier_infrastructure::{
    FileCollectionStore, FileEnvironmentRepository, FileHistoryStore, JsonCollectionTranslator,
    ReqwestHttpClient, SystemClock,
};

use crate::config::Settings;

/// Collection service over the JSON file store.
pub type Collections = CollectionService<FileCollectionStore>;
/// Environment service over the JSON file repository.
pub type Environments = EnvironmentService<FileEnvironmentRepository>;
/// History service over the JSON file store.
pub type History = HistoryService<FileHistoryStore>;
/// Request executor wired to reqwest and the file stores.
pub type Executor = ExecuteRequest<ReqwestHttpClient, FileHistoryStore, FileEnvironmentRepository>;

/// Process-wide state handed to every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Collections
    pub collections: Arc<Collections>,
    /// Environments
    pub environments: Arc<Environments>,
    /// History log
    pub history: Arc<History>,
    /// Request executor
    pub executor: Arc<Executor>,
    /// Collection import
    pub importer: Arc<ImportCollection<FileCollectionStore, JsonCollectionTranslator>>,
    /// Collection export
    pub exporter: Arc<ExportCollection<FileCollectionStore, JsonCollectionTranslator>>,
    /// Whether error responses carry diagnostic detail
    pub expose_error_details: bool,
}

impl AppState {
    /// Wires the file-backed stores and the reqwest client from `settings`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self, HttpClientError> {
        let client = match &settings.executor.user_agent {
            Some(user_agent) => ReqwestHttpClient::with_user_agent(user_agent)?,
            None => ReqwestHttpClient::new()?,
        };
        Ok(Self::with_client(settings, client))
    }

    /// Wires the file-backed stores around an existing client.
    #[must_use]
    pub fn with_client(settings: &Settings, client: ReqwestHttpClient) -> Self {
        let data_dir = settings.data_dir();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let translator = Arc::new(JsonCollectionTranslator::new());

        let collections = Arc::new(CollectionService::new(
            FileCollectionStore::new(&data_dir),
            Arc::clone(&clock),
        ));
        let environments = Arc::new(EnvironmentService::new(
            FileEnvironmentRepository::new(&data_dir),
            Arc::clone(&clock),
        ));
        let history = Arc::new(HistoryService::new(
            FileHistoryStore::new(&data_dir),
            clock,
            settings.history.max_entries,
        ));
        let executor = Arc::new(ExecuteRequest::new(
            Arc::new(client),
            Arc::clone(&history),
            Arc::clone(&environments),
            settings.executor.default_timeout_ms,
        ));

        Self {
            importer: Arc::new(ImportCollection::new(
                Arc::clone(&collections),
                Arc::clone(&translator),
            )),
            exporter: Arc::new(ExportCollection::new(Arc::clone(&collections), translator)),
            collections,
            environments,
            history,
            executor,
            expose_error_details: settings.api.expose_error_details,
        }
    }
}
