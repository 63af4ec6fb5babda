use std::time::Duration;

use reqwest::multipart;
use serde::{Deserialize, Serialize};

use crate::{Category, ClassifyError, FailureKind};

#[derive(Debug, Clone)]
pub struct ClassifySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub analyze_timeout: Duration,
    /// Wait budget for document uploads; `None` leaves the upload unbounded.
    pub upload_timeout: Option<Duration>,
    pub accepted_extensions: Vec<String>,
}

impl Default for ClassifySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            analyze_timeout: Duration::from_secs(10),
            upload_timeout: Some(Duration::from_secs(30)),
            accepted_extensions: vec![
                "txt".to_string(),
                "md".to_string(),
                "pdf".to_string(),
                "doc".to_string(),
                "docx".to_string(),
            ],
        }
    }
}

impl ClassifySettings {
    /// Extension gate for the document picker.
    pub fn is_accepted_document(&self, file_name: &str) -> bool {
        let Some((stem, extension)) = file_name.rsplit_once('.') else {
            return false;
        };
        !stem.is_empty()
            && self
                .accepted_extensions
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Vec<Category>, ClassifyError>;
    async fn upload(&self, file_name: &str, bytes: Vec<u8>)
        -> Result<Vec<Category>, ClassifyError>;
}

#[derive(Debug, Clone)]
pub struct HttpClassifier {
    settings: ClassifySettings,
}

impl HttpClassifier {
    pub fn new(settings: ClassifySettings) -> Self {
        Self { settings }
    }

    fn build_client(&self, timeout: Option<Duration>) -> Result<reqwest::Client, ClassifyError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::RequestBuild, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ClassifyError> {
        let raw = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&raw)
            .map_err(|err| ClassifyError::new(FailureKind::RequestBuild, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Classifier for HttpClassifier {
    async fn analyze(&self, text: &str) -> Result<Vec<Category>, ClassifyError> {
        let url = self.endpoint("analyze")?;
        let client = self.build_client(Some(self.settings.analyze_timeout))?;

        let response = client
            .post(url)
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_categories(response).await
    }

    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<Category>, ClassifyError> {
        let url = self.endpoint("upload")?;
        let client = self.build_client(self.settings.upload_timeout)?;

        let part = multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = multipart::Form::new().part("file", part);

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_categories(response).await
    }
}

async fn read_categories(response: reqwest::Response) -> Result<Vec<Category>, ClassifyError> {
    let status = response.status();
    if !status.is_success() {
        let server_message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        return Err(ClassifyError::new(
            FailureKind::ServerRejected {
                status: status.as_u16(),
                server_message,
            },
            status.to_string(),
        ));
    }

    let body = response
        .json::<ClassifyResponse>()
        .await
        .map_err(|err| ClassifyError::new(FailureKind::Unknown, err.to_string()))?;
    Ok(body.categories)
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() || err.is_connect() {
        return ClassifyError::new(FailureKind::NoResponse, err.to_string());
    }
    if err.is_builder() || err.is_request() {
        return ClassifyError::new(FailureKind::RequestBuild, err.to_string());
    }
    ClassifyError::new(FailureKind::Unknown, err.to_string())
}
