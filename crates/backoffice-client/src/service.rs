// Resource services
//
// One generic service covers list/get/create/update/delete for every
// resource. Each call performs exactly one round-trip; failures are returned
// to the caller as-is.

use backoffice_core::{
    ApplicationStatus, Commentaries, Commentary, JobApplication, JobApplications, Page,
    PageRequest, Resource, SignInRequest, SignInResponse, UpdateCommentary, UpdateJobApplication,
};
use std::marker::PhantomData;

use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use crate::transport::ApiRequest;

const SIGN_IN_PATH: &str = "/api/auth/login";

/// CRUD service for resource `R`
pub struct ResourceService<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: Resource> ResourceService<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// `GET {base}?page&size&sort=createdAt,desc`
    pub async fn list(&self, page: u32, size: u32) -> Result<Page<R::Item>> {
        self.list_with(PageRequest::new(page, size)).await
    }

    /// List with an explicit page request (custom sort or unsorted)
    pub async fn list_with(&self, request: PageRequest) -> Result<Page<R::Item>> {
        self.list_filtered(request, Vec::new()).await
    }

    /// List with extra equality filters sent as query parameters
    pub async fn list_filtered(
        &self,
        request: PageRequest,
        filters: Vec<(String, String)>,
    ) -> Result<Page<R::Item>> {
        let api_request = ApiRequest::get(R::path())
            .with_query(request.query_pairs())
            .with_query(filters);
        self.client
            .fetch_json(api_request, || fetch_failed::<R>())
            .await
    }

    /// `GET {base}/{id}`
    pub async fn get(&self, id: &R::Id) -> Result<R::Item> {
        self.client
            .fetch_json(ApiRequest::get(item_path::<R>(id)?), || fetch_failed::<R>())
            .await
    }

    /// `POST {base}`
    pub async fn create(&self, dto: &R::Create) -> Result<R::Item> {
        let request = ApiRequest::post(R::path()).with_body(serde_json::to_value(dto)?);
        self.client
            .fetch_json(request, || format!("Failed to create {}", R::singular()))
            .await
    }

    /// `PATCH {base}/{id}` with only the fields present in `dto`
    pub async fn update(&self, id: &R::Id, dto: &R::Update) -> Result<R::Item> {
        let request = ApiRequest::patch(item_path::<R>(id)?).with_body(serde_json::to_value(dto)?);
        self.client
            .fetch_json(request, || {
                format!("Failed to update {} with ID: {}", R::singular(), id)
            })
            .await
    }

    /// `DELETE {base}/{id}`
    pub async fn delete(&self, id: &R::Id) -> Result<()> {
        self.client
            .fetch_empty(ApiRequest::delete(item_path::<R>(id)?), || {
                format!("Failed to delete {} with ID: {}", R::singular(), id)
            })
            .await
    }
}

impl ResourceService<JobApplications> {
    /// Move an application to another pipeline stage
    pub async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<JobApplication> {
        self.update(&id.to_string(), &UpdateJobApplication::status(status))
            .await
    }
}

impl ResourceService<Commentaries> {
    /// Comments left on one blog post
    pub async fn list_for_blog(&self, blog_id: &str, page: u32, size: u32) -> Result<Page<Commentary>> {
        self.list_filtered(
            PageRequest::new(page, size),
            vec![("blogId".to_string(), blog_id.to_string())],
        )
        .await
    }

    /// Approve or withdraw a comment
    pub async fn set_approved(&self, id: &str, approved: bool) -> Result<Commentary> {
        let update = UpdateCommentary {
            approved: Some(approved),
            ..Default::default()
        };
        self.update(&id.to_string(), &update).await
    }
}

/// Sign-in endpoint
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/auth/login`
    pub async fn sign_in(&self, credentials: &SignInRequest) -> Result<SignInResponse> {
        let request = ApiRequest::post(SIGN_IN_PATH).with_body(serde_json::to_value(credentials)?);
        self.client
            .fetch_json(request, || "Failed to sign in".to_string())
            .await
    }
}

/// `{base}/{id}` with the id encoded as a single path segment
fn item_path<R: Resource>(id: &R::Id) -> Result<String> {
    let raw = id.to_string();
    if raw.is_empty() || raw == "." || raw == ".." {
        return Err(ClientError::invalid_id(R::singular(), raw));
    }
    Ok(format!("{}/{}", R::path(), encode_segment(&raw)))
}

// form_urlencoded leaves only [A-Za-z0-9*-._] as-is and turns spaces into
// '+'; a literal '+' is already escaped, so every '+' left is a space.
fn encode_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn fetch_failed<R: Resource>() -> String {
    format!("Failed to fetch {}", R::plural())
}
