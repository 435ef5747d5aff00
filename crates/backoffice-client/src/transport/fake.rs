// In-memory fake backend
//
// Answers API requests the way the real backend does (paginated envelopes,
// server-generated ids and timestamps, {"message"} error bodies) without a
// network. Selected with TransportMode::Fake; also the backbone of the
// service tests.

use async_trait::async_trait;
use backoffice_core::{Direction, Page, PageRequest, ResourceKind, SignInRequest, Sort};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::Result;

const LOGIN_PATH: &str = "/api/auth/login";
const GENERATED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];
const PAGING_PARAMS: [&str; 3] = ["page", "size", "sort"];

/// Fake backend transport
///
/// Cloning shares the same tables, so a test can keep a handle for
/// inspection while the client owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<RwLock<FakeState>>,
}

#[derive(Debug, Default)]
struct FakeState {
    tables: HashMap<ResourceKind, Vec<Value>>,
    /// email -> password
    accounts: HashMap<String, String>,
    next_tag_id: i64,
    canned: VecDeque<ApiResponse>,
    log: Vec<ApiRequest>,
}

impl FakeTransport {
    /// Empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with demo content and an
    /// `admin@example.com` / `admin` account
    pub fn demo() -> Self {
        let mut state = FakeState::default();
        state.seed_demo(Utc::now());
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Insert a record as if it had been created through the API.
    /// Generated fields in `fields` are replaced.
    pub async fn insert(&self, kind: ResourceKind, fields: Value) -> Value {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.state.write().await.insert(kind, fields, Utc::now())
    }

    /// Register sign-in credentials
    pub async fn add_account(&self, email: impl Into<String>, password: impl Into<String>) {
        self.state
            .write()
            .await
            .accounts
            .insert(email.into(), password.into());
    }

    /// Queue a response returned verbatim for the next request
    pub async fn respond_next(&self, response: ApiResponse) {
        self.state.write().await.canned.push_back(response);
    }

    /// Every request received so far
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.state.read().await.log.clone()
    }

    /// Number of records stored for a resource
    pub async fn count(&self, kind: ResourceKind) -> usize {
        self.state
            .read()
            .await
            .tables
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.write().await;
        state.log.push(request.clone());

        if let Some(canned) = state.canned.pop_front() {
            return Ok(canned);
        }

        Ok(state.handle(&request))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

// ============================================================================
// Request handling
// ============================================================================

impl FakeState {
    fn handle(&mut self, request: &ApiRequest) -> ApiResponse {
        if request.path == LOGIN_PATH && request.method == Method::Post {
            return self.sign_in(request.body.as_ref());
        }

        let Some((kind, id)) = route(&request.path) else {
            return error(
                404,
                format!("No handler for {} {}", request.method, request.path),
            );
        };

        match (request.method, id) {
            (Method::Get, None) => self.list(kind, request),
            (Method::Post, None) => self.create(kind, request.body.as_ref()),
            (Method::Get, Some(id)) => self.get(kind, id),
            (Method::Patch, Some(id)) => self.update(kind, id, request.body.as_ref()),
            (Method::Delete, Some(id)) => self.delete(kind, id),
            (method, _) => error(405, format!("{} not allowed on {}", method, request.path)),
        }
    }

    fn list(&self, kind: ResourceKind, request: &ApiRequest) -> ApiResponse {
        let page = match parse_number(request.query_param("page"), 0) {
            Ok(page) => page,
            Err(response) => return response,
        };
        let size = match parse_number(request.query_param("size"), PageRequest::DEFAULT_SIZE) {
            Ok(size) => size,
            Err(response) => return response,
        };
        let sort = match request.query_param("sort").map(str::parse::<Sort>) {
            Some(Ok(sort)) => Some(sort),
            Some(Err(e)) => return error(400, e.to_string()),
            None => None,
        };

        let filters: Vec<(&str, &str)> = request
            .query
            .iter()
            .filter(|(k, _)| !PAGING_PARAMS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let mut rows: Vec<Value> = self
            .tables
            .get(&kind)
            .into_iter()
            .flatten()
            .filter(|row| filters.iter().all(|(k, v)| field_matches(row, k, v)))
            .cloned()
            .collect();

        let mut page_request = PageRequest::new(page, size);
        match sort {
            Some(sort) => {
                rows.sort_by(|a, b| {
                    let ord = compare_values(a.get(&sort.property), b.get(&sort.property));
                    match sort.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                });
                page_request = page_request.with_sort(sort);
            }
            None => page_request = page_request.unsorted(),
        }

        let page = Page::paginate(rows, &page_request);
        ApiResponse::json(200, &serde_json::to_value(page).unwrap_or_default())
    }

    fn get(&self, kind: ResourceKind, id: &str) -> ApiResponse {
        match self.find(kind, id) {
            Some(row) => ApiResponse::json(200, row),
            None => not_found(kind, id),
        }
    }

    fn create(&mut self, kind: ResourceKind, body: Option<&Value>) -> ApiResponse {
        let Some(Value::Object(fields)) = body else {
            return error(400, "Request body must be a JSON object");
        };
        if let Some(missing) = required_fields(kind)
            .iter()
            .find(|field| fields.get(**field).map_or(true, Value::is_null))
        {
            return error(400, format!("Missing required field: {missing}"));
        }

        let record = self.insert(kind, fields.clone(), Utc::now());
        ApiResponse::json(201, &record)
    }

    fn update(&mut self, kind: ResourceKind, id: &str, body: Option<&Value>) -> ApiResponse {
        let Some(Value::Object(changes)) = body else {
            return error(400, "Request body must be a JSON object");
        };
        let Some(Value::Object(fields)) = self
            .tables
            .get_mut(&kind)
            .and_then(|rows| rows.iter_mut().find(|row| field_matches(row, "id", id)))
        else {
            return not_found(kind, id);
        };

        let old_email = fields.get("email").and_then(Value::as_str).map(str::to_string);
        let mut new_password = None;
        for (key, value) in changes {
            if GENERATED_FIELDS.contains(&key.as_str()) || value.is_null() {
                continue;
            }
            if kind == ResourceKind::Users && key == "password" {
                new_password = value.as_str().map(str::to_string);
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }
        fields.insert("updatedAt".to_string(), json!(timestamp(Utc::now())));
        apply_side_fields(kind, fields, Utc::now());

        if kind == ResourceKind::Users {
            let email = fields.get("email").and_then(Value::as_str).map(str::to_string);
            // Credentials follow the account to its new email
            let password = match (&old_email, &email) {
                (Some(old), Some(new)) if old != new => {
                    let previous = self.accounts.remove(old);
                    new_password.or(previous)
                }
                _ => new_password,
            };
            if let (Some(password), Some(email)) = (password, email) {
                self.accounts.insert(email, password);
            }
        }

        ApiResponse::json(200, &Value::Object(fields.clone()))
    }

    fn delete(&mut self, kind: ResourceKind, id: &str) -> ApiResponse {
        let Some(rows) = self.tables.get_mut(&kind) else {
            return not_found(kind, id);
        };
        match rows.iter().position(|row| field_matches(row, "id", id)) {
            Some(index) => {
                rows.remove(index);
                ApiResponse::empty(204)
            }
            None => not_found(kind, id),
        }
    }

    fn sign_in(&self, body: Option<&Value>) -> ApiResponse {
        let Some(credentials) = body
            .cloned()
            .and_then(|b| serde_json::from_value::<SignInRequest>(b).ok())
        else {
            return error(400, "Email and password are required");
        };

        let valid = self
            .accounts
            .get(&credentials.email)
            .is_some_and(|password| *password == credentials.password);
        let user = self
            .tables
            .get(&ResourceKind::Users)
            .into_iter()
            .flatten()
            .find(|row| field_matches(row, "email", &credentials.email));

        match (valid, user) {
            (true, Some(user)) => ApiResponse::json(
                200,
                &json!({ "token": format!("fake-{}", Uuid::now_v7()), "user": user }),
            ),
            _ => error(401, "Invalid email or password"),
        }
    }

    fn find(&self, kind: ResourceKind, id: &str) -> Option<&Value> {
        self.tables
            .get(&kind)?
            .iter()
            .find(|row| field_matches(row, "id", id))
    }

    fn insert(&mut self, kind: ResourceKind, mut fields: Map<String, Value>, at: DateTime<Utc>) -> Value {
        for field in GENERATED_FIELDS {
            fields.remove(field);
        }

        let id = if kind == ResourceKind::Tags {
            self.next_tag_id += 1;
            json!(self.next_tag_id)
        } else {
            json!(Uuid::now_v7().to_string())
        };
        fields.insert("id".to_string(), id);
        fields.insert("createdAt".to_string(), json!(timestamp(at)));
        fields.insert("updatedAt".to_string(), json!(timestamp(at)));

        match kind {
            ResourceKind::Users => {
                let password = fields.remove("password");
                if let (Some(Value::String(password)), Some(Value::String(email))) =
                    (password, fields.get("email"))
                {
                    self.accounts.insert(email.clone(), password);
                }
            }
            ResourceKind::Commentaries => {
                let approved = fields.get("approved").and_then(Value::as_bool).unwrap_or(false);
                fields.insert("approved".to_string(), json!(approved));
            }
            _ => {}
        }
        apply_side_fields(kind, &mut fields, at);

        let record = Value::Object(fields);
        self.tables.entry(kind).or_default().push(record.clone());
        record
    }

    fn seed_demo(&mut self, now: DateTime<Utc>) {
        let mut minutes = 0;
        let mut at = || {
            minutes += 1;
            now - Duration::minutes(minutes)
        };
        let seed = |value: Value| match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let engineering = self.insert(
            ResourceKind::BlogCategories,
            seed(json!({"name": "Engineering", "slug": "engineering", "description": "How we build things"})),
            at(),
        );
        self.insert(
            ResourceKind::BlogCategories,
            seed(json!({"name": "Culture", "slug": "culture"})),
            at(),
        );
        let rust = self.insert(ResourceKind::Tags, seed(json!({"name": "Rust", "slug": "rust"})), at());
        self.insert(ResourceKind::Tags, seed(json!({"name": "Web", "slug": "web"})), at());
        self.insert(ResourceKind::Tags, seed(json!({"name": "Hiring", "slug": "hiring"})), at());
        let author = self.insert(
            ResourceKind::Bloggers,
            seed(json!({"firstName": "Grace", "lastName": "Hopper", "email": "grace@example.com", "bio": "Compilers and coffee"})),
            at(),
        );
        self.insert(
            ResourceKind::Bloggers,
            seed(json!({"firstName": "Alan", "lastName": "Kay", "email": "alan@example.com"})),
            at(),
        );

        let post = self.insert(
            ResourceKind::Blogs,
            seed(json!({
                "title": "Shipping the new back-office",
                "slug": "shipping-the-new-back-office",
                "summary": "What changed and why",
                "content": "We rebuilt the admin screens on top of a typed API client.",
                "status": "PUBLISHED",
                "categoryId": engineering["id"],
                "bloggerId": author["id"],
                "tagIds": [rust["id"]]
            })),
            at(),
        );
        self.insert(
            ResourceKind::Blogs,
            seed(json!({
                "title": "We are hiring",
                "slug": "we-are-hiring",
                "content": "Draft announcement.",
                "status": "DRAFT",
                "bloggerId": author["id"]
            })),
            at(),
        );
        self.insert(
            ResourceKind::Commentaries,
            seed(json!({
                "blogId": post["id"],
                "authorName": "Reader",
                "authorEmail": "reader@example.com",
                "content": "Great write-up!"
            })),
            at(),
        );

        let positions = ["Backend Engineer", "Frontend Engineer", "Designer"];
        let names = [
            ("Ada", "Lovelace"),
            ("Barbara", "Liskov"),
            ("Claude", "Shannon"),
            ("Donald", "Knuth"),
            ("Edsger", "Dijkstra"),
            ("Frances", "Allen"),
            ("Guido", "Rossum"),
            ("Hedy", "Lamarr"),
            ("Ivan", "Sutherland"),
            ("John", "Backus"),
            ("Ken", "Thompson"),
            ("Leslie", "Lamport"),
        ];
        for (i, (first, last)) in names.iter().enumerate() {
            self.insert(
                ResourceKind::JobApplications,
                seed(json!({
                    "firstName": first,
                    "lastName": last,
                    "email": format!("{}@example.com", first.to_lowercase()),
                    "position": positions[i % positions.len()],
                    "status": "PENDING"
                })),
                at(),
            );
        }

        self.insert(
            ResourceKind::Users,
            seed(json!({
                "username": "admin",
                "email": "admin@example.com",
                "password": "admin",
                "firstName": "Site",
                "lastName": "Admin",
                "role": "ADMIN",
                "enabled": true
            })),
            at(),
        );
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn route(path: &str) -> Option<(ResourceKind, Option<&str>)> {
    ResourceKind::ALL.into_iter().find_map(|kind| {
        let rest = path.strip_prefix(kind.path())?;
        if rest.is_empty() || rest == "/" {
            return Some((kind, None));
        }
        let id = rest.strip_prefix('/')?;
        (!id.is_empty() && !id.contains('/')).then_some((kind, Some(id)))
    })
}

fn required_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Blogs => &["title", "slug", "content"],
        ResourceKind::BlogCategories | ResourceKind::Tags => &["name", "slug"],
        ResourceKind::Commentaries => &["blogId", "authorName", "authorEmail", "content"],
        ResourceKind::Bloggers => &["firstName", "lastName", "email"],
        ResourceKind::JobApplications => &["firstName", "lastName", "email", "position"],
        ResourceKind::Users => &["username", "email", "password"],
    }
}

/// Fields the backend derives from others
fn apply_side_fields(kind: ResourceKind, fields: &mut Map<String, Value>, at: DateTime<Utc>) {
    if kind == ResourceKind::Blogs
        && fields.get("status").and_then(Value::as_str) == Some("PUBLISHED")
        && fields.get("publishedAt").map_or(true, Value::is_null)
    {
        fields.insert("publishedAt".to_string(), json!(timestamp(at)));
    }
}

fn field_matches(row: &Value, field: &str, expected: &str) -> bool {
    match row.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        Some(Value::Bool(b)) => b.to_string() == expected,
        _ => false,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn parse_number(raw: Option<&str>, default: u32) -> std::result::Result<u32, ApiResponse> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| error(400, format!("Invalid paging parameter: {raw}"))),
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn error(status: u16, message: impl Into<String>) -> ApiResponse {
    ApiResponse::json(status, &json!({ "message": message.into(), "status": status }))
}

fn not_found(kind: ResourceKind, id: &str) -> ApiResponse {
    error(404, format!("No {} found with ID: {}", kind.singular(), id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(response: &ApiResponse) -> Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[test]
    fn test_route_resolution() {
        assert_eq!(route("/api/blogs"), Some((ResourceKind::Blogs, None)));
        assert_eq!(
            route("/api/blog-categories/abc"),
            Some((ResourceKind::BlogCategories, Some("abc")))
        );
        assert_eq!(route("/api/blogsX"), None);
        assert_eq!(route("/api/blogs/a/b"), None);
        assert_eq!(route("/api/unknown"), None);
    }

    #[tokio::test]
    async fn test_create_assigns_generated_fields() {
        let fake = FakeTransport::new();
        let response = fake
            .send(ApiRequest::post("/api/blog-categories").with_body(json!({
                "id": "client-chosen",
                "name": "News",
                "slug": "news"
            })))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        let created = body(&response);
        assert_ne!(created["id"], "client-chosen");
        assert!(created["createdAt"].is_string());
        assert_eq!(created["createdAt"], created["updatedAt"]);
    }

    #[tokio::test]
    async fn test_tags_get_numeric_ids() {
        let fake = FakeTransport::new();
        let first = fake
            .insert(ResourceKind::Tags, json!({"name": "a", "slug": "a"}))
            .await;
        let second = fake
            .insert(ResourceKind::Tags, json!({"name": "b", "slug": "b"}))
            .await;

        assert_eq!(first["id"], json!(1));
        assert_eq!(second["id"], json!(2));

        let response = fake.send(ApiRequest::get("/api/tags/2")).await.unwrap();
        assert_eq!(body(&response)["name"], "b");
    }

    #[tokio::test]
    async fn test_missing_required_field_is_rejected() {
        let fake = FakeTransport::new();
        let response = fake
            .send(ApiRequest::post("/api/tags").with_body(json!({"name": "x"})))
            .await
            .unwrap();

        assert_eq!(response.status, 400);
        assert_eq!(body(&response)["message"], "Missing required field: slug");
        assert_eq!(fake.count(ResourceKind::Tags).await, 0);
    }

    #[tokio::test]
    async fn test_list_filters_by_query_field() {
        let fake = FakeTransport::new();
        for blog_id in ["b1", "b1", "b2"] {
            fake.insert(
                ResourceKind::Commentaries,
                json!({"blogId": blog_id, "authorName": "n", "authorEmail": "e", "content": "c"}),
            )
            .await;
        }

        let response = fake
            .send(
                ApiRequest::get("/api/commentaries")
                    .with_query(vec![("blogId".to_string(), "b1".to_string())]),
            )
            .await
            .unwrap();
        assert_eq!(body(&response)["totalElements"], 2);
    }

    #[tokio::test]
    async fn test_patch_merges_and_ignores_generated_fields() {
        let fake = FakeTransport::new();
        let created = fake
            .insert(ResourceKind::BlogCategories, json!({"name": "Old", "slug": "old"}))
            .await;
        let id = created["id"].as_str().unwrap();

        let response = fake
            .send(
                ApiRequest::patch(format!("/api/blog-categories/{id}"))
                    .with_body(json!({"name": "New", "id": "hijack", "slug": null})),
            )
            .await
            .unwrap();

        let updated = body(&response);
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["name"], "New");
        assert_eq!(updated["slug"], "old");
    }

    #[tokio::test]
    async fn test_new_commentary_approval() {
        let fake = FakeTransport::new();
        let created = fake
            .insert(
                ResourceKind::Commentaries,
                json!({"blogId": "b", "authorName": "n", "authorEmail": "e", "content": "c"}),
            )
            .await;
        assert_eq!(created["approved"], false);

        let created = fake
            .insert(
                ResourceKind::Commentaries,
                json!({"blogId": "b", "authorName": "n", "authorEmail": "e", "content": "c", "approved": true}),
            )
            .await;
        assert_eq!(created["approved"], true);
    }

    #[tokio::test]
    async fn test_user_password_is_not_stored() {
        let fake = FakeTransport::new();
        let user = fake
            .insert(
                ResourceKind::Users,
                json!({"username": "u", "email": "u@example.com", "password": "pw"}),
            )
            .await;
        assert!(user.get("password").is_none());

        let response = fake
            .send(ApiRequest::post(LOGIN_PATH).with_body(json!({"email": "u@example.com", "password": "pw"})))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(body(&response)["user"]["username"], "u");
    }

    #[tokio::test]
    async fn test_sign_in_follows_email_change() {
        let fake = FakeTransport::new();
        let user = fake
            .insert(
                ResourceKind::Users,
                json!({"username": "u", "email": "old@example.com", "password": "pw"}),
            )
            .await;
        let path = format!("{}/{}", ResourceKind::Users.path(), user["id"].as_str().unwrap());

        let response = fake
            .send(ApiRequest::patch(path).with_body(json!({"email": "new@example.com"})))
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let sign_in = |email: &str| {
            ApiRequest::post(LOGIN_PATH).with_body(json!({"email": email, "password": "pw"}))
        };
        let response = fake.send(sign_in("new@example.com")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(body(&response)["user"]["email"], "new@example.com");

        let response = fake.send(sign_in("old@example.com")).await.unwrap();
        assert_eq!(response.status, 401);
    }

    #[tokio::test]
    async fn test_unknown_route_and_bad_method() {
        let fake = FakeTransport::new();
        let response = fake.send(ApiRequest::get("/api/nope")).await.unwrap();
        assert_eq!(response.status, 404);

        let response = fake.send(ApiRequest::delete("/api/blogs")).await.unwrap();
        assert_eq!(response.status, 405);
    }

    #[tokio::test]
    async fn test_demo_seed() {
        let fake = FakeTransport::demo();
        assert_eq!(fake.count(ResourceKind::JobApplications).await, 12);
        assert_eq!(fake.count(ResourceKind::Tags).await, 3);
        assert_eq!(fake.count(ResourceKind::Users).await, 1);
    }
}
