//! Test harness: the real router and pipeline wiring over in-memory stores
//! and stubbed external capabilities. No database or network is touched; the
//! pool is lazy and the exercised paths never reach it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::{Extension, Router};
use axum_test::TestServer;
use bytes::Bytes;
use chrono::Utc;
use efiling_api::auth::CurrentUser;
use efiling_api::handlers;
use efiling_api::state::{AppState, DbState, FilingState};
use efiling_core::models::{Application, Attachment, EFilingSubmission, PreparedPdf};
use efiling_core::{AppError, Keyring};
use efiling_db::{ApplicationStore, PreparedPdfStore, SubmissionStore};
use efiling_processing::{
    DocumentNormalizer, ImagePayload, Rasterizer, RasterizeError, UploadValidator,
};
use efiling_services::efiling::client::EFilingClientError;
use efiling_services::{
    ContentCodec, EFilingClient, FilingData, FilingParser, SubmissionService, SubmitOutcome,
    UploadOutcome,
};
use uuid::Uuid;

pub const TEST_KEY_ID: &str = "default";
pub const TEST_UNIVERSAL_ID: &str = "UID-123";

pub fn test_keyring() -> Arc<Keyring> {
    let key = b"01234567890123456789012345678901".to_vec();
    Arc::new(Keyring::from_key_bytes(vec![(TEST_KEY_ID, key)]).unwrap())
}

// ----- In-memory stores -----

#[derive(Default)]
pub struct MemoryApplications {
    pub records: Mutex<HashMap<Uuid, Application>>,
}

impl MemoryApplications {
    pub fn insert(&self, application: Application) {
        self.records
            .lock()
            .unwrap()
            .insert(application.id, application);
    }

    pub fn get(&self, id: Uuid) -> Option<Application> {
        self.records.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl ApplicationStore for MemoryApplications {
    async fn find_for_user(
        &self,
        application_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Application>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&application_id)
            .filter(|a| a.user_id == user_id)
            .cloned())
    }

    async fn set_last_submission(
        &self,
        application_id: Uuid,
        submission_id: &str,
    ) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        if let Some(application) = records.get_mut(&application_id) {
            application.last_submission_id = Some(submission_id.to_string());
            application.last_updated = Utc::now();
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPreparedPdfs {
    pub records: Mutex<HashMap<Uuid, PreparedPdf>>,
}

#[async_trait]
impl PreparedPdfStore for MemoryPreparedPdfs {
    async fn find(&self, id: Uuid) -> Result<Option<PreparedPdf>, AppError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct MemorySubmissions {
    pub records: Mutex<Vec<EFilingSubmission>>,
}

impl MemorySubmissions {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn single(&self) -> EFilingSubmission {
        let records = self.records.lock().unwrap();
        assert_eq!(records.len(), 1, "expected exactly one submission record");
        records[0].clone()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissions {
    async fn create(
        &self,
        transaction_id: Uuid,
        application_id: Uuid,
    ) -> Result<EFilingSubmission, AppError> {
        let record = EFilingSubmission {
            id: Uuid::new_v4(),
            transaction_id,
            application_id,
            submission_id: None,
            package_number: None,
            package_url: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn record_upload(
        &self,
        transaction_id: Uuid,
        submission_id: &str,
    ) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.transaction_id == transaction_id)
            .expect("record exists");
        record.submission_id = Some(submission_id.to_string());
        record.last_updated = Utc::now();
        Ok(())
    }

    async fn touch(&self, transaction_id: Uuid) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records
            .iter_mut()
            .find(|r| r.transaction_id == transaction_id)
        {
            record.last_updated = Utc::now();
        }
        Ok(())
    }

    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<EFilingSubmission>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.submission_id.as_deref() == Some(submission_id))
            .cloned())
    }

    async fn set_package(
        &self,
        id: Uuid,
        package_number: &str,
        package_url: &str,
    ) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .expect("record exists");
        record.package_number = Some(package_number.to_string());
        record.package_url = Some(package_url.to_string());
        record.last_updated = Utc::now();
        Ok(())
    }
}

// ----- Stubbed external capabilities -----

pub struct StubRasterizer;

#[async_trait]
impl Rasterizer for StubRasterizer {
    async fn image_to_pdf(&self, _images: Vec<ImagePayload>) -> Result<Bytes, RasterizeError> {
        Ok(Bytes::from_static(b"%PDF-converted"))
    }
}

/// What the stub hub should answer for each phase.
#[derive(Clone)]
pub enum HubBehavior {
    /// Upload returns this submission id, submit returns this redirect URL.
    Succeed {
        submission_id: &'static str,
        redirect_url: &'static str,
        message: Option<&'static str>,
    },
    /// Upload fails, optionally with a hub message.
    UploadFails(Option<&'static str>),
    /// Upload succeeds but the submission phase fails.
    SubmitFails(&'static str),
}

/// Records what reached the hub so tests can assert on the outgoing package.
#[derive(Default)]
pub struct HubCalls {
    pub uploaded: Mutex<Vec<(String, String)>>,
    pub filing_data: Mutex<Option<serde_json::Value>>,
}

pub struct StubEFilingClient {
    behavior: HubBehavior,
    pub calls: Arc<HubCalls>,
}

impl StubEFilingClient {
    pub fn new(behavior: HubBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(HubCalls::default()),
        }
    }
}

#[async_trait]
impl EFilingClient for StubEFilingClient {
    async fn upload_documents(
        &self,
        _universal_id: &str,
        _transaction_id: Uuid,
        attachments: &[Attachment],
    ) -> Result<UploadOutcome, EFilingClientError> {
        *self.calls.uploaded.lock().unwrap() = attachments
            .iter()
            .map(|a| (a.filename.clone(), a.content_type.clone()))
            .collect();

        match &self.behavior {
            HubBehavior::Succeed { submission_id, .. } => Ok(UploadOutcome {
                submission_id: Some(submission_id.to_string()),
                message: None,
            }),
            HubBehavior::UploadFails(message) => Ok(UploadOutcome {
                submission_id: None,
                message: message.map(String::from),
            }),
            HubBehavior::SubmitFails(_) => Ok(UploadOutcome {
                submission_id: Some("S1".to_string()),
                message: None,
            }),
        }
    }

    async fn generate_submission_url(
        &self,
        _universal_id: &str,
        _transaction_id: Uuid,
        _submission_id: &str,
        filing_data: &FilingData,
    ) -> Result<SubmitOutcome, EFilingClientError> {
        *self.calls.filing_data.lock().unwrap() =
            Some(serde_json::to_value(filing_data).unwrap());

        match &self.behavior {
            HubBehavior::Succeed {
                redirect_url,
                message,
                ..
            } => Ok(SubmitOutcome {
                redirect_url: Some(redirect_url.to_string()),
                message: message.map(String::from),
            }),
            HubBehavior::UploadFails(_) => Ok(SubmitOutcome::default()),
            HubBehavior::SubmitFails(message) => Ok(SubmitOutcome {
                redirect_url: None,
                message: Some(message.to_string()),
            }),
        }
    }
}

// ----- App assembly -----

pub struct TestApp {
    pub server: TestServer,
    pub user_id: Uuid,
    pub applications: Arc<MemoryApplications>,
    pub prepared_pdfs: Arc<MemoryPreparedPdfs>,
    pub submissions: Arc<MemorySubmissions>,
    pub hub_calls: Arc<HubCalls>,
    pub keyring: Arc<Keyring>,
}

impl TestApp {
    /// Seed an application owned by the test user, with an encrypted
    /// prepared package when `metadata` is given.
    pub fn seed_application(&self, metadata: Option<serde_json::Value>) -> Application {
        let prepared_pdf_id = metadata.map(|metadata| {
            let id = Uuid::new_v4();
            let record = PreparedPdf {
                id,
                key_id: TEST_KEY_ID.to_string(),
                data: self
                    .keyring
                    .encrypt(TEST_KEY_ID, b"%PDF-generated-order")
                    .unwrap(),
                json_data: self
                    .keyring
                    .encrypt(TEST_KEY_ID, metadata.to_string().as_bytes())
                    .unwrap(),
                created_at: Utc::now(),
            };
            self.prepared_pdfs.records.lock().unwrap().insert(id, record);
            id
        });

        let application = Application {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            prepared_pdf_id,
            last_submission_id: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        };
        self.applications.insert(application.clone());
        application
    }

    pub fn filing_path(&self, application_id: Uuid) -> String {
        format!("/api/v1/applications/{}/filing", application_id)
    }
}

pub fn setup_test_app(behavior: HubBehavior) -> TestApp {
    setup_test_app_inner(behavior, true)
}

/// A server whose requests carry no authenticated user extension.
pub fn setup_unauthenticated_app() -> TestApp {
    setup_test_app_inner(
        HubBehavior::Succeed {
            submission_id: "S1",
            redirect_url: "https://filing.example/S1",
            message: None,
        },
        false,
    )
}

fn setup_test_app_inner(behavior: HubBehavior, authenticated: bool) -> TestApp {
    let user_id = Uuid::new_v4();
    let applications = Arc::new(MemoryApplications::default());
    let prepared_pdfs = Arc::new(MemoryPreparedPdfs::default());
    let submissions = Arc::new(MemorySubmissions::default());
    let keyring = test_keyring();

    let client = StubEFilingClient::new(behavior);
    let hub_calls = client.calls.clone();

    let submission_service = Arc::new(SubmissionService::new(
        applications.clone(),
        submissions.clone(),
        Arc::new(client),
    ));

    let state = Arc::new(AppState {
        db: DbState {
            pool: sqlx::PgPool::connect_lazy("postgres://localhost/efiling_test")
                .expect("lazy pool"),
            applications: applications.clone(),
            prepared_pdfs: prepared_pdfs.clone(),
            submissions: submissions.clone(),
        },
        filing: FilingState {
            validator: Arc::new(UploadValidator::default()),
            normalizer: Arc::new(DocumentNormalizer::new(Arc::new(StubRasterizer))),
            codec: Arc::new(ContentCodec::new(keyring.clone())),
            parser: Arc::new(FilingParser::new("test-app", "https://app.example")),
            submission_service,
        },
    });

    let mut router = Router::new()
        .route(
            "/api/v1/applications/{application_id}/filing",
            post(handlers::submission_create::submit_filing)
                .put(handlers::submission_update::update_filing),
        )
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .with_state(state);

    if authenticated {
        router = router.layer(Extension(CurrentUser {
            id: user_id,
            universal_id: TEST_UNIVERSAL_ID.to_string(),
        }));
    }

    TestApp {
        server: TestServer::new(router).expect("test server"),
        user_id,
        applications,
        prepared_pdfs,
        submissions,
        hub_calls,
        keyring,
    }
}
