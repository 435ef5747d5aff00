// Backoffice data model
//
// Typed mirrors of the backend's REST payloads:
// - one module per resource with Response / Create / Update shapes
// - a single generic Page<T> envelope for every list endpoint
// - Resource descriptors that bind shapes, base path and labels together
//
// Nothing here performs I/O; see backoffice-client for the services.

pub mod auth;
pub mod blog;
pub mod blog_category;
pub mod blogger;
pub mod candidate;
pub mod commentary;
pub mod error;
pub mod page;
pub mod resource;
pub mod tag;
pub mod user;

// Re-exports for convenience
pub use auth::{SignInRequest, SignInResponse};
pub use blog::{Blog, BlogStatus, Blogs, CreateBlog, UpdateBlog};
pub use blog_category::{BlogCategories, BlogCategory, CreateBlogCategory, UpdateBlogCategory};
pub use blogger::{Blogger, Bloggers, CreateBlogger, UpdateBlogger};
pub use candidate::{
    ApplicationStatus, CreateJobApplication, JobApplication, JobApplications,
    UpdateJobApplication,
};
pub use commentary::{Commentaries, Commentary, CreateCommentary, UpdateCommentary};
pub use error::ErrorBody;
pub use page::{Direction, Page, PageRequest, Pageable, Sort, SortInfo};
pub use resource::{Resource, ResourceKind};
pub use tag::{CreateTag, Tag, TagId, Tags, UpdateTag};
pub use user::{CreateUser, UpdateUser, User, UserRole, Users};
