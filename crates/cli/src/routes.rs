// Route definitions
//
//   /                          dashboard
//   /sign-in                   sign-in form
//   /{resource}?page=&size=    list
//   /{resource}/new            creation form
//   /{resource}/{id}           detail
//   /{resource}/{id}/edit      edit form

use backoffice_core::{PageRequest, ResourceKind};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    List {
        kind: ResourceKind,
        page: u32,
        size: u32,
    },
    New {
        kind: ResourceKind,
    },
    Detail {
        kind: ResourceKind,
        id: String,
    },
    Edit {
        kind: ResourceKind,
        id: String,
    },
    NotFound(String),
}

impl Route {
    pub fn list(kind: ResourceKind) -> Self {
        Route::List {
            kind,
            page: 0,
            size: PageRequest::DEFAULT_SIZE,
        }
    }

    /// Resolve a path such as `/applications?page=1&size=5`
    pub fn parse(input: &str) -> Self {
        let (path, query) = input.split_once('?').unwrap_or((input, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["sign-in"] => Route::SignIn,
            [resource, rest @ ..] => {
                let Ok(kind) = resource.parse::<ResourceKind>() else {
                    return Route::NotFound(input.to_string());
                };
                match rest {
                    [] => {
                        let mut page = 0;
                        let mut size = PageRequest::DEFAULT_SIZE;
                        for pair in query.split('&').filter(|p| !p.is_empty()) {
                            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                            let parsed = value.parse::<u32>();
                            match (key, parsed) {
                                ("page", Ok(v)) => page = v,
                                ("size", Ok(v)) if v > 0 => size = v,
                                _ => return Route::NotFound(input.to_string()),
                            }
                        }
                        Route::List { kind, page, size }
                    }
                    ["new"] => Route::New { kind },
                    [id] => Route::Detail {
                        kind,
                        id: id.to_string(),
                    },
                    [id, "edit"] => Route::Edit {
                        kind,
                        id: id.to_string(),
                    },
                    _ => Route::NotFound(input.to_string()),
                }
            }
        }
    }

    /// Resource the route belongs to, if any
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            Route::List { kind, .. }
            | Route::New { kind }
            | Route::Detail { kind, .. }
            | Route::Edit { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::SignIn => write!(f, "/sign-in"),
            Route::List { kind, page, size } => write!(f, "/{}?page={}&size={}", kind, page, size),
            Route::New { kind } => write!(f, "/{}/new", kind),
            Route::Detail { kind, id } => write!(f, "/{}/{}", kind, id),
            Route::Edit { kind, id } => write!(f, "/{}/{}/edit", kind, id),
            Route::NotFound(path) => write!(f, "{}", path),
        }
    }
}
