use super::role::Role;

pub const OVERVIEW: &str = "Overview";
pub const TASKS: &str = "Tasks";
pub const MESSAGES: &str = "Messages";
pub const FILES: &str = "Files";
pub const MEMBERS: &str = "Members";
pub const APPLICATIONS: &str = "Applications";

const VIEWER_SECTIONS: &[&str] = &[OVERVIEW];
const CONTRIBUTOR_SECTIONS: &[&str] = &[OVERVIEW, TASKS, MESSAGES, FILES, MEMBERS];
const CREATOR_SECTIONS: &[&str] = &[OVERVIEW, TASKS, MESSAGES, FILES, MEMBERS, APPLICATIONS];

/// Project tabs visible to a role, in display order
pub fn allowed_sections(role: Role) -> &'static [&'static str] {
    match role {
        Role::Creator => CREATOR_SECTIONS,
        Role::Contributor => CONTRIBUTOR_SECTIONS,
        Role::Viewer => VIEWER_SECTIONS,
    }
}
