/// The set of tags owned by git-pr-stack, e.g. `PR_BRANCH/login-form`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNamespace {
    prefix: String,
}

impl TagNamespace {
    /// Create a namespace from the marker prefix (without the trailing `/`)
    pub fn new(prefix: impl Into<String>) -> Self {
        TagNamespace {
            prefix: prefix.into(),
        }
    }

    /// The string every owned tag starts with, separator included
    pub fn tag_prefix(&self) -> String {
        format!("{}/", self.prefix)
    }

    /// Tag name for a derived branch
    /// Example: prefix="PR_BRANCH", branch="login" -> "PR_BRANCH/login"
    pub fn tag_name(&self, branch: &str) -> String {
        format!("{}/{}", self.prefix, branch)
    }

    /// Whether a tag belongs to this namespace
    pub fn contains(&self, tag: &str) -> bool {
        tag.strip_prefix(&self.prefix)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}
