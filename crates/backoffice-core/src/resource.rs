// Resource descriptors
//
// A Resource ties together the DTO shapes, the base path and the labels used
// in error messages for one backend entity type. Services are generic over it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Static description of a backend resource
pub trait Resource: Send + Sync + 'static {
    /// Identity type used in `{base}/{id}` paths
    type Id: fmt::Display + Send + Sync;
    /// Full server shape
    type Item: DeserializeOwned + Serialize + Send + Sync;
    /// Creation payload (no generated fields)
    type Create: Serialize + Send + Sync;
    /// Partial update payload
    type Update: Serialize + Send + Sync;

    const KIND: ResourceKind;

    fn path() -> &'static str {
        Self::KIND.path()
    }

    fn singular() -> &'static str {
        Self::KIND.singular()
    }

    fn plural() -> &'static str {
        Self::KIND.plural()
    }
}

/// Every resource the back-office manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Blogs,
    BlogCategories,
    Tags,
    Commentaries,
    Bloggers,
    JobApplications,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Blogs,
        ResourceKind::BlogCategories,
        ResourceKind::Tags,
        ResourceKind::Commentaries,
        ResourceKind::Bloggers,
        ResourceKind::JobApplications,
        ResourceKind::Users,
    ];

    /// Base path on the backend
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Blogs => "/api/blogs",
            ResourceKind::BlogCategories => "/api/blog-categories",
            ResourceKind::Tags => "/api/tags",
            ResourceKind::Commentaries => "/api/commentaries",
            ResourceKind::Bloggers => "/api/bloggers",
            ResourceKind::JobApplications => "/api/job-applications",
            ResourceKind::Users => "/api/users",
        }
    }

    /// Segment used in front-end routes
    pub fn slug(&self) -> &'static str {
        match self {
            ResourceKind::Blogs => "blogs",
            ResourceKind::BlogCategories => "categories",
            ResourceKind::Tags => "tags",
            ResourceKind::Commentaries => "commentaries",
            ResourceKind::Bloggers => "bloggers",
            ResourceKind::JobApplications => "applications",
            ResourceKind::Users => "users",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Blogs => "blog",
            ResourceKind::BlogCategories => "category",
            ResourceKind::Tags => "tag",
            ResourceKind::Commentaries => "commentary",
            ResourceKind::Bloggers => "blogger",
            ResourceKind::JobApplications => "application",
            ResourceKind::Users => "user",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Blogs => "blogs",
            ResourceKind::BlogCategories => "categories",
            ResourceKind::Tags => "tags",
            ResourceKind::Commentaries => "commentaries",
            ResourceKind::Bloggers => "bloggers",
            ResourceKind::JobApplications => "applications",
            ResourceKind::Users => "users",
        }
    }

    /// Human title for page headers
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Blogs => "Blog Posts",
            ResourceKind::BlogCategories => "Blog Categories",
            ResourceKind::Tags => "Tags",
            ResourceKind::Commentaries => "Commentary",
            ResourceKind::Bloggers => "Bloggers",
            ResourceKind::JobApplications => "Candidates",
            ResourceKind::Users => "Users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown resource: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trips_for_every_kind() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.slug().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(
            "widgets".parse::<ResourceKind>(),
            Err(UnknownResource("widgets".to_string()))
        );
    }

    #[test]
    fn test_job_applications_labels() {
        let kind = ResourceKind::JobApplications;
        assert_eq!(kind.path(), "/api/job-applications");
        assert_eq!(kind.singular(), "application");
        assert_eq!(kind.plural(), "applications");
    }
}
