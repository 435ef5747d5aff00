// Table and detail layouts per resource

use backoffice_core::{
    Blog, BlogCategory, Blogger, Commentary, JobApplication, Tag, TagId, User,
};
use chrono::{DateTime, Utc};

/// How a resource shows up in list and detail pages
pub trait Tabular {
    /// Column headers and widths for list pages
    const COLUMNS: &'static [(&'static str, usize)];
    /// Wire names of the editable fields, in form order
    const FORM_FIELDS: &'static [&'static str];
    /// Boolean field driven by a switch: (wire name, label)
    const SWITCH: Option<(&'static str, &'static str)> = None;

    fn id_string(&self) -> String;

    /// One value per column
    fn row(&self) -> Vec<String>;

    /// Label/value pairs for the detail page
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// Parses path ids into a resource's id type
pub trait ParseId: Sized {
    fn parse_id(raw: &str) -> anyhow::Result<Self>;
}

impl ParseId for String {
    fn parse_id(raw: &str) -> anyhow::Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            anyhow::bail!("id must not be empty");
        }
        if raw == "." || raw == ".." || raw.contains(['/', '?', '#']) {
            anyhow::bail!("id must be a single path segment, got {:?}", raw);
        }
        Ok(raw.to_string())
    }
}

impl ParseId for TagId {
    fn parse_id(raw: &str) -> anyhow::Result<Self> {
        raw.parse()
            .map_err(|_| anyhow::anyhow!("tag ids are numeric, got {:?}", raw))
    }
}

fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

impl Tabular for Blog {
    const COLUMNS: &'static [(&'static str, usize)] =
        &[("ID", 36), ("TITLE", 30), ("STATUS", 10), ("CREATED", 16)];
    const FORM_FIELDS: &'static [&'static str] = &[
        "title",
        "slug",
        "summary",
        "content",
        "coverImageUrl",
        "status",
        "categoryId",
        "bloggerId",
        "tagIds",
    ];

    fn id_string(&self) -> String {
        self.id.clone()
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.status.to_string(),
            date(&self.created_at),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let tags = if self.tag_ids.is_empty() {
            "-".to_string()
        } else {
            self.tag_ids
                .iter()
                .map(TagId::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Slug", self.slug.clone()),
            ("Status", self.status.to_string()),
            ("Summary", or_dash(&self.summary)),
            ("Category", or_dash(&self.category_id)),
            ("Blogger", or_dash(&self.blogger_id)),
            ("Tags", tags),
            (
                "Published",
                self.published_at.as_ref().map_or("-".to_string(), date),
            ),
            ("Created", date(&self.created_at)),
            ("Updated", date(&self.updated_at)),
            ("Content", self.content.clone()),
        ]
    }
}

impl Tabular for BlogCategory {
    const COLUMNS: &'static [(&'static str, usize)] =
        &[("ID", 36), ("NAME", 24), ("SLUG", 24)];
    const FORM_FIELDS: &'static [&'static str] = &["name", "slug", "description"];

    fn id_string(&self) -> String {
        self.id.clone()
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.slug.clone()]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Slug", self.slug.clone()),
            ("Description", or_dash(&self.description)),
            ("Created", date(&self.created_at)),
        ]
    }
}

impl Tabular for Tag {
    const COLUMNS: &'static [(&'static str, usize)] = &[("ID", 8), ("NAME", 24), ("SLUG", 24)];
    const FORM_FIELDS: &'static [&'static str] = &["name", "slug"];

    fn id_string(&self) -> String {
        self.id.to_string()
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.slug.clone()]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Slug", self.slug.clone()),
            ("Created", date(&self.created_at)),
        ]
    }
}

impl Tabular for Commentary {
    const COLUMNS: &'static [(&'static str, usize)] = &[
        ("ID", 36),
        ("AUTHOR", 20),
        ("APPROVED", 8),
        ("COMMENT", 30),
    ];
    const FORM_FIELDS: &'static [&'static str] =
        &["blogId", "authorName", "authorEmail", "content"];
    const SWITCH: Option<(&'static str, &'static str)> = Some(("approved", "Approved"));

    fn id_string(&self) -> String {
        self.id.clone()
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.author_name.clone(),
            yes_no(self.approved),
            self.content.clone(),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Blog", self.blog_id.clone()),
            ("Author", format!("{} <{}>", self.author_name, self.author_email)),
            ("Created", date(&self.created_at)),
            ("Comment", self.content.clone()),
        ]
    }
}

impl Tabular for Blogger {
    const COLUMNS: &'static [(&'static str, usize)] =
        &[("ID", 36), ("NAME", 24), ("EMAIL", 30)];
    const FORM_FIELDS: &'static [&'static str] =
        &["firstName", "lastName", "email", "bio", "avatarUrl"];

    fn id_string(&self) -> String {
        self.id.clone()
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.full_name(), self.email.clone()]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.full_name()),
            ("Email", self.email.clone()),
            ("Bio", or_dash(&self.bio)),
            ("Avatar", or_dash(&self.avatar_url)),
            ("Created", date(&self.created_at)),
        ]
    }
}

impl Tabular for JobApplication {
    const COLUMNS: &'static [(&'static str, usize)] = &[
        ("ID", 36),
        ("CANDIDATE", 22),
        ("POSITION", 20),
        ("STATUS", 10),
        ("APPLIED", 16),
    ];
    const FORM_FIELDS: &'static [&'static str] = &[
        "firstName",
        "lastName",
        "email",
        "phone",
        "position",
        "resumeUrl",
        "coverLetter",
        "status",
    ];

    fn id_string(&self) -> String {
        self.id.clone()
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.position.clone(),
            self.status.to_string(),
            date(&self.created_at),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Candidate", self.full_name()),
            ("Email", self.email.clone()),
            ("Phone", or_dash(&self.phone)),
            ("Position", self.position.clone()),
            ("Status", self.status.to_string()),
            ("Resume", or_dash(&self.resume_url)),
            ("Applied", date(&self.created_at)),
            ("Cover letter", or_dash(&self.cover_letter)),
        ]
    }
}

impl Tabular for User {
    const COLUMNS: &'static [(&'static str, usize)] = &[
        ("ID", 36),
        ("USERNAME", 16),
        ("EMAIL", 28),
        ("ROLE", 8),
        ("ENABLED", 7),
    ];
    const FORM_FIELDS: &'static [&'static str] =
        &["username", "email", "password", "firstName", "lastName", "role"];
    const SWITCH: Option<(&'static str, &'static str)> = Some(("enabled", "Enabled"));

    fn id_string(&self) -> String {
        self.id.clone()
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.username.clone(),
            self.email.clone(),
            self.role.to_string(),
            yes_no(self.enabled),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Username", self.username.clone()),
            ("Name", self.display_name()),
            ("Email", self.email.clone()),
            ("Role", self.role.to_string()),
            ("Created", date(&self.created_at)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_has_one_value_per_column() {
        let tag = Tag {
            id: TagId(3),
            name: "Rust".to_string(),
            slug: "rust".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(tag.row().len(), Tag::COLUMNS.len());
        assert_eq!(tag.id_string(), "3");
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(TagId::parse_id("42").unwrap(), TagId(42));
        assert!(TagId::parse_id("rust").is_err());
        assert_eq!(String::parse_id(" abc-123 ").unwrap(), "abc-123");
        assert!(String::parse_id("  ").is_err());
    }

    #[test]
    fn test_parse_id_rejects_path_syntax() {
        for raw in ["..", ".", "../users/u1", "a?x=1", "a#top"] {
            let err = String::parse_id(raw).unwrap_err();
            assert!(err.to_string().contains("single path segment"), "{raw}");
        }
    }
}
