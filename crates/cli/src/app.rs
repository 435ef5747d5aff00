// Application shell
//
// Owns the client, the session and the toast host. Every invocation is one
// Action: it resolves to a Document (or nothing), which is written to stdout;
// toasts go to stderr afterwards.

use std::io::Write;

use anyhow::Result;
use backoffice_client::ApiClient;
use backoffice_core::{Resource, ResourceKind};
use serde_json::Value;

use crate::components::{
    DropdownAction, DropdownEntry, PrintButton, Printer, ProfileDropdown, SignInForm, Toaster,
};
use crate::output::OutputFormat;
use crate::pages::views::Tabular;
use crate::pages::{dashboard, for_resource, resource, sign_in, Document};
use crate::routes::Route;
use crate::session::Session;

/// One user interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Open(Route),
    Create {
        kind: ResourceKind,
        payload: Value,
    },
    Update {
        kind: ResourceKind,
        id: String,
        payload: Value,
    },
    Delete {
        kind: ResourceKind,
        id: String,
    },
    Toggle {
        kind: ResourceKind,
        id: String,
    },
    SignIn(SignInForm),
    SignOut,
    Profile,
    Settings,
}

pub struct App {
    client: ApiClient,
    session: Session,
    dropdown: ProfileDropdown,
    toaster: Toaster,
    output: OutputFormat,
    quiet: bool,
    printer: Option<Box<dyn Printer>>,
}

impl App {
    pub fn new(client: ApiClient, session: Session, output: OutputFormat, quiet: bool) -> Self {
        let client = client.with_token(session.token().map(str::to_string));
        Self {
            client,
            session,
            dropdown: ProfileDropdown::default(),
            toaster: Toaster::default(),
            output,
            quiet,
            printer: None,
        }
    }

    /// Send every rendered page to `printer` as well
    pub fn with_printer(mut self, printer: Box<dyn Printer>) -> Self {
        self.printer = Some(printer);
        self
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn navigate(&mut self, route: &Route) -> Result<Document> {
        tracing::debug!(route = %route, "navigate");
        match route {
            Route::Home => dashboard::dashboard_page(&self.client, &self.session).await,
            Route::SignIn => Ok(sign_in::sign_in_page(&SignInForm::default())),
            Route::List { kind, page, size } => for_resource!(*kind, R => {
                resource::list_page::<R>(&self.client, *page, *size).await
            }),
            Route::New { kind } => Ok(for_resource!(*kind, R => resource::new_page::<R>())),
            Route::Detail { kind, id } => for_resource!(*kind, R => {
                resource::detail_page::<R>(&self.client, id).await
            }),
            Route::Edit { kind, id } => for_resource!(*kind, R => {
                resource::edit_page::<R>(&self.client, id).await
            }),
            Route::NotFound(path) => anyhow::bail!("No page at {}", path),
        }
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<Option<Document>> {
        match action {
            Action::Open(route) => self.navigate(&route).await.map(Some),
            Action::Create { kind, payload } => for_resource!(kind, R => {
                let item = resource::create::<R>(&self.client, payload).await?;
                self.toaster
                    .success(format!("Created {} {}", R::singular(), item.id_string()));
                resource::detail_document::<R>(&item, None).map(Some)
            }),
            Action::Update { kind, id, payload } => for_resource!(kind, R => {
                let item = resource::update::<R>(&self.client, &id, payload).await?;
                self.toaster
                    .success(format!("Updated {} {}", R::singular(), item.id_string()));
                resource::detail_document::<R>(&item, None).map(Some)
            }),
            Action::Delete { kind, id } => {
                for_resource!(kind, R => resource::delete::<R>(&self.client, &id).await?);
                self.toaster
                    .success(format!("Deleted {} {}", kind.singular(), id));
                Ok(None)
            }
            Action::Toggle { kind, id } => for_resource!(kind, R => {
                let (item, switch) = resource::toggle::<R>(&self.client, &id).await?;
                self.toaster
                    .success(format!("Updated {} {}", R::singular(), item.id_string()));
                resource::detail_document::<R>(&item, Some(&switch)).map(Some)
            }),
            Action::SignIn(form) => {
                let response = sign_in::sign_in(&self.client, &form).await?;
                self.toaster
                    .success(format!("Signed in as {}", response.user.display_name()));
                let doc = sign_in::signed_in_page(&response);
                self.session.sign_in(response);
                self.refresh_token();
                Ok(Some(doc))
            }
            Action::SignOut => {
                let had_session = self.session.is_authenticated();
                self.dropdown.toggle();
                self.dropdown
                    .select(DropdownEntry::SignOut, &mut self.session);
                self.refresh_token();
                if had_session {
                    self.toaster.info("Signed out");
                } else {
                    self.toaster.info("No active session");
                }
                self.navigate(&Route::SignIn).await.map(Some)
            }
            Action::Profile | Action::Settings => {
                let entry = if action == Action::Profile {
                    DropdownEntry::Profile
                } else {
                    DropdownEntry::Settings
                };
                self.dropdown.toggle();
                match self.dropdown.select(entry, &mut self.session) {
                    DropdownAction::Navigate(route) => self.navigate(&route).await.map(Some),
                    DropdownAction::SignedOut => Ok(None),
                    DropdownAction::UnknownUser => anyhow::bail!(
                        "Signed-in user unknown: set BACKOFFICE_USER_ID or sign in again"
                    ),
                }
            }
        }
    }

    /// Run one action and write its page and toasts.
    /// Returns false when the action failed.
    pub async fn run<O: Write, E: Write>(
        &mut self,
        action: Action,
        out: &mut O,
        err: &mut E,
    ) -> Result<bool> {
        match self.dispatch(action).await {
            Ok(Some(doc)) => {
                writeln!(out, "{}", self.render(&doc)?)?;
                self.print(&doc);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(error = ?e, "action failed");
                self.toaster.error(format!("{:#}", e));
            }
        }

        let ok = !self.toaster.has_errors();
        self.toaster.flush(err, self.quiet)?;
        Ok(ok)
    }

    fn render(&self, doc: &Document) -> Result<String> {
        if let Some(serialized) = self.output.render_value(&doc.data)? {
            return Ok(serialized.trim_end().to_string());
        }
        if self.quiet {
            return Ok(doc.lines.join("\n"));
        }
        Ok(doc.render_text(&self.dropdown.render(&self.session)))
    }

    fn print(&mut self, doc: &Document) {
        let Some(printer) = &self.printer else {
            return;
        };
        let text = doc.render_text(&self.dropdown.render(&self.session));
        match PrintButton::default().press(printer.as_ref(), &text) {
            Ok(()) => self.toaster.info("Page sent to printer"),
            Err(e) => self.toaster.error(format!("Failed to print: {}", e)),
        }
    }

    fn refresh_token(&mut self) {
        self.client = self
            .client
            .clone()
            .with_token(self.session.token().map(str::to_string));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_client::FakeTransport;
    use serde_json::json;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;
    use std::sync::Arc;

    fn app(output: OutputFormat, quiet: bool) -> (App, FakeTransport) {
        let transport = FakeTransport::demo();
        let client = ApiClient::new(Arc::new(transport.clone()));
        (App::new(client, Session::anonymous(), output, quiet), transport)
    }

    async fn run(app: &mut App, action: Action) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = app.run(action, &mut out, &mut err).await.unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_list_route_renders_page() {
        let (mut app, _) = app(OutputFormat::Text, false);
        let route = Route::parse("/applications?page=1&size=5");

        let (ok, out, err) = run(&mut app, Action::Open(route)).await;

        assert!(ok);
        assert!(out.starts_with("Candidates | Backoffice\n"));
        assert!(out.contains("Guest ▾"));
        assert!(out.trim_end().ends_with("[ Print ]"));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_fails() {
        let (mut app, _) = app(OutputFormat::Text, false);
        let (ok, out, err) = run(&mut app, Action::Open(Route::parse("/nope"))).await;

        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, "✗ No page at /nope\n");
    }

    #[tokio::test]
    async fn test_failed_fetch_toasts_fallback_message() {
        let (mut app, transport) = app(OutputFormat::Text, true);
        transport
            .respond_next(backoffice_client::ApiResponse::new(500, b"oops".to_vec()))
            .await;

        let (ok, _, err) = run(&mut app, Action::Open(Route::list(ResourceKind::Blogs))).await;

        assert!(!ok);
        assert_eq!(err, "✗ Failed to fetch blogs\n");
    }

    #[tokio::test]
    async fn test_json_output_is_the_page_envelope() {
        let (mut app, _) = app(OutputFormat::Json, false);
        let (ok, out, _) = run(&mut app, Action::Open(Route::list(ResourceKind::Tags))).await;

        assert!(ok);
        let page: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(page["totalElements"], 3);
        assert_eq!(page["number"], 0);
    }

    #[tokio::test]
    async fn test_create_and_delete_toast() {
        let (mut app, transport) = app(OutputFormat::Text, false);

        let (ok, out, err) = run(
            &mut app,
            Action::Create {
                kind: ResourceKind::Tags,
                payload: json!({"name": "Async", "slug": "async"}),
            },
        )
        .await;
        assert!(ok);
        assert!(out.starts_with("tag 4 | Backoffice"));
        assert_eq!(err, "✓ Created tag 4\n");

        let (ok, out, err) = run(
            &mut app,
            Action::Delete {
                kind: ResourceKind::Tags,
                id: "4".to_string(),
            },
        )
        .await;
        assert!(ok);
        assert!(out.is_empty());
        assert_eq!(err, "✓ Deleted tag 4\n");
        assert_eq!(transport.count(ResourceKind::Tags).await, 3);
    }

    #[tokio::test]
    async fn test_quiet_hides_success_toasts() {
        let (mut app, _) = app(OutputFormat::Text, true);
        let (ok, _, err) = run(
            &mut app,
            Action::Delete {
                kind: ResourceKind::Tags,
                id: "1".to_string(),
            },
        )
        .await;
        assert!(ok);
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_then_profile_then_sign_out() {
        let (mut app, transport) = app(OutputFormat::Text, true);

        let (ok, out, _) = run(
            &mut app,
            Action::SignIn(SignInForm::new("admin@example.com", "admin")),
        )
        .await;
        assert!(ok);
        assert!(out.contains("export BACKOFFICE_API_TOKEN=fake-"));
        assert!(app.session().is_authenticated());

        let (ok, out, _) = run(&mut app, Action::Profile).await;
        assert!(ok);
        assert!(out.contains("admin@example.com"));
        let last = transport.requests().await.pop().unwrap();
        assert!(last.bearer.is_some_and(|t| t.starts_with("fake-")));

        let (ok, out, _) = run(&mut app, Action::Settings).await;
        assert!(ok);
        assert!(out.contains("username"));
        assert!(out.trim_end().ends_with("[ Save ]"));

        let (ok, _, _) = run(&mut app, Action::SignOut).await;
        assert!(ok);
        assert!(!app.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_profile_from_restored_session() {
        let transport = FakeTransport::demo();
        let client = ApiClient::new(Arc::new(transport.clone()));
        let admin = client
            .auth()
            .sign_in(&backoffice_core::SignInRequest {
                email: "admin@example.com".to_string(),
                password: "admin".to_string(),
            })
            .await
            .unwrap();

        let session = Session::from_token(Some(admin.token)).with_user_id(Some(admin.user.id));
        let mut app = App::new(client, session, OutputFormat::Text, true);

        let (ok, out, err) = run(&mut app, Action::Profile).await;
        assert!(ok, "{err}");
        assert!(out.contains("admin@example.com"));

        let (ok, out, _) = run(&mut app, Action::Settings).await;
        assert!(ok);
        assert!(out.trim_end().ends_with("[ Save ]"));
    }

    #[tokio::test]
    async fn test_profile_with_token_only_explains_missing_user() {
        let client = ApiClient::new(Arc::new(FakeTransport::demo()));
        let session = Session::from_token(Some("tok".to_string()));
        let mut app = App::new(client, session, OutputFormat::Text, false);

        let (ok, out, err) = run(&mut app, Action::Profile).await;

        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "✗ Signed-in user unknown: set BACKOFFICE_USER_ID or sign in again\n"
        );
        assert!(app.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_out_without_session() {
        let (mut app, _) = app(OutputFormat::Text, false);
        let (ok, out, err) = run(&mut app, Action::SignOut).await;

        assert!(ok);
        assert!(out.starts_with("Sign in | Backoffice"));
        assert_eq!(err, "ℹ No active session\n");
    }

    #[derive(Clone, Default)]
    struct RecordingPrinter(Rc<RefCell<Vec<String>>>);

    impl Printer for RecordingPrinter {
        fn print(&self, document: &str) -> io::Result<()> {
            self.0.borrow_mut().push(document.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_printer_receives_text_page() {
        let printer = RecordingPrinter::default();
        let (app, _) = app(OutputFormat::Json, false);
        let mut app = app.with_printer(Box::new(printer.clone()));

        let (ok, _, err) = run(&mut app, Action::Open(Route::New { kind: ResourceKind::Tags })).await;

        assert!(ok);
        assert_eq!(err, "ℹ Page sent to printer\n");
        let printed = printer.0.borrow();
        assert_eq!(printed.len(), 1);
        assert!(printed[0].starts_with("New tag | Backoffice"));
    }
}
