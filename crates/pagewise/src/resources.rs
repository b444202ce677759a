//! Bindings for a help-desk style service.
//!
//! These cover the collection shapes the crate supports: a searchable root
//! collection, a collection scoped by either of two parents, and a writable
//! nested collection.

use crate::binding::Binding;

/// Organizations, searchable at the root.
pub static ORGANIZATIONS: Binding = Binding::new(
    "organization",
    "get_organizations",
    "organizations",
    "get_organization",
    "organization",
)
.searchable("search_organization")
.creatable("create_organization")
.updatable("update_organization")
.destroyable("destroy_organization")
.requires(&["name"]);

/// Users, searchable at the root.
pub static USERS: Binding = Binding::new("user", "get_users", "users", "get_user", "user")
    .searchable("search_user")
    .creatable("create_user")
    .updatable("update_user")
    .requires(&["name", "email"]);

/// Organization memberships, listable under an organization or a user.
pub static MEMBERSHIPS: Binding = Binding::new(
    "membership",
    "get_memberships",
    "organization_memberships",
    "get_membership",
    "organization_membership",
)
.creatable("create_membership")
.destroyable("destroy_membership")
.scoped_by(&["organization_id", "user_id"])
.requires(&["organization_id", "user_id"]);

/// Help center categories.
pub static CATEGORIES: Binding = Binding::new(
    "category",
    "get_help_center_categories",
    "categories",
    "get_help_center_category",
    "category",
)
.creatable("create_help_center_category")
.updatable("update_help_center_category")
.destroyable("destroy_help_center_category")
.requires(&["name", "locale"]);

/// Help center sections, nested under a category.
pub static SECTIONS: Binding = Binding::new(
    "section",
    "get_help_center_sections",
    "sections",
    "get_help_center_section",
    "section",
)
.creatable("create_help_center_section")
.updatable("update_help_center_section")
.destroyable("destroy_help_center_section")
.scoped_by(&["category_id"])
.requires(&["name", "locale", "category_id"]);

/// Every binding defined here, by collection root.
pub static ALL: &[&Binding] = &[&ORGANIZATIONS, &USERS, &MEMBERSHIPS, &CATEGORIES, &SECTIONS];

/// Looks up a binding by its collection root, e.g. `"sections"`.
pub fn by_collection(root: &str) -> Option<&'static Binding> {
    ALL.iter().copied().find(|b| b.collection_root == root)
}
