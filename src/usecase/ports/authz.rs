/// Decides whether mutating actions render for a section.
pub trait Authorizer: Send + Sync {
    fn can_edit(&self, section: &str) -> bool;
}
