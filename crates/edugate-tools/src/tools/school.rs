//! School-management operations
//!
//! Operations exposed by the remote school-management API, grouped by domain.
//!
//! ## Tiers
//!
//! - `safe` - lookups (`get_*`, `list_*`, `search_*`)
//! - `moderate` - reversible changes (create, enroll, report, book)
//! - `destructive` - removals and credential resets
//! - `critical` - account/course/group deletion and bulk imports
//!
//! Operations that take a person use the `username` argument, declared as the
//! identity parameter so that free-text names can be normalized.

use edugate_core::RiskTier;
use serde_json::json;

use super::common::{create_schema, username_property};
use crate::catalog::OperationSpec;
use crate::registry::ToolCategory;

/// Collection of all school-management operations
pub struct SchoolOperations;

impl SchoolOperations {
    /// Get all operations
    pub fn all() -> Vec<OperationSpec> {
        let mut ops = Vec::new();
        ops.extend(users());
        ops.extend(groups());
        ops.extend(courses());
        ops.extend(absences());
        ops.extend(timetable());
        ops.extend(rooms());
        ops.extend(exams());
        ops.extend(messaging());
        ops.extend(system());
        ops
    }
}

// ============================================================================
// Users
// ============================================================================

fn users() -> Vec<OperationSpec> {
    vec![
        OperationSpec::new(
            "list_users",
            "List user accounts, optionally filtered by role or class.",
            RiskTier::Safe,
            ToolCategory::Users,
            create_schema(
                json!({
                    "role": {
                        "type": "string",
                        "enum": ["student", "teacher", "staff", "admin"],
                        "description": "Only list accounts with this role"
                    },
                    "class": {
                        "type": "string",
                        "description": "Only list members of this class (e.g., '7b')"
                    }
                }),
                vec![],
            ),
        ),
        OperationSpec::new(
            "get_user",
            "Get the profile of a single user account.",
            RiskTier::Safe,
            ToolCategory::Users,
            create_schema(json!({ "username": username_property() }), vec!["username"]),
        )
        .with_identity_param("username"),
        OperationSpec::new(
            "search_users",
            "Search user accounts by name fragment.",
            RiskTier::Safe,
            ToolCategory::Users,
            create_schema(
                json!({
                    "query": {
                        "type": "string",
                        "description": "Name fragment to search for"
                    }
                }),
                vec!["query"],
            ),
        ),
        OperationSpec::new(
            "create_user",
            "Create a new user account.",
            RiskTier::Moderate,
            ToolCategory::Users,
            create_schema(
                json!({
                    "first_name": { "type": "string", "description": "Given name" },
                    "last_name": { "type": "string", "description": "Family name" },
                    "role": {
                        "type": "string",
                        "enum": ["student", "teacher", "staff"],
                        "description": "Account role"
                    },
                    "class": { "type": "string", "description": "Class for student accounts" }
                }),
                vec!["first_name", "last_name", "role"],
            ),
        ),
        OperationSpec::new(
            "update_user",
            "Update profile fields of a user account.",
            RiskTier::Moderate,
            ToolCategory::Users,
            create_schema(
                json!({
                    "username": username_property(),
                    "fields": {
                        "type": "object",
                        "description": "Profile fields to change (e.g., {\"class\": \"8a\"})"
                    }
                }),
                vec!["username", "fields"],
            ),
        )
        .with_identity_param("username"),
        OperationSpec::new(
            "reset_password",
            "Reset the password of a user account and return a one-time password.",
            RiskTier::Destructive,
            ToolCategory::Users,
            create_schema(json!({ "username": username_property() }), vec!["username"]),
        )
        .with_identity_param("username")
        .with_warning("The current password stops working immediately and all active sessions are signed out."),
        OperationSpec::new(
            "deactivate_user",
            "Deactivate a user account so it can no longer sign in.",
            RiskTier::Destructive,
            ToolCategory::Users,
            create_schema(
                json!({
                    "username": username_property(),
                    "reason": { "type": "string", "description": "Reason recorded in the audit log" }
                }),
                vec!["username"],
            ),
        )
        .with_identity_param("username")
        .with_warning("The account cannot sign in until an administrator reactivates it."),
        OperationSpec::new(
            "delete_user",
            "Permanently delete a user account.",
            RiskTier::Critical,
            ToolCategory::Users,
            create_schema(json!({ "username": username_property() }), vec!["username"]),
        )
        .with_identity_param("username")
        .with_warning("Deletes the account together with its files, mailbox and grade history. This cannot be undone."),
        OperationSpec::new(
            "import_users",
            "Bulk import user accounts from CSV.",
            RiskTier::Critical,
            ToolCategory::Users,
            create_schema(
                json!({
                    "csv": {
                        "type": "string",
                        "description": "CSV with columns first_name,last_name,role,class"
                    },
                    "deactivate_missing": {
                        "type": "boolean",
                        "description": "Deactivate existing accounts missing from the CSV",
                        "default": false
                    }
                }),
                vec!["csv"],
            ),
        )
        .with_warning("A bulk import can create, modify or deactivate many accounts at once."),
    ]
}

// ============================================================================
// Groups
// ============================================================================

fn groups() -> Vec<OperationSpec> {
    let group = json!({ "type": "string", "description": "Group name" });

    vec![
        OperationSpec::new(
            "list_groups",
            "List groups.",
            RiskTier::Safe,
            ToolCategory::Groups,
            create_schema(json!({}), vec![]),
        ),
        OperationSpec::new(
            "get_group_members",
            "List the members of a group.",
            RiskTier::Safe,
            ToolCategory::Groups,
            create_schema(json!({ "group": group.clone() }), vec!["group"]),
        ),
        OperationSpec::new(
            "create_group",
            "Create a new group.",
            RiskTier::Moderate,
            ToolCategory::Groups,
            create_schema(
                json!({
                    "group": group.clone(),
                    "description": { "type": "string", "description": "Group description" }
                }),
                vec!["group"],
            ),
        ),
        OperationSpec::new(
            "add_group_member",
            "Add a user to a group.",
            RiskTier::Moderate,
            ToolCategory::Groups,
            create_schema(
                json!({ "group": group.clone(), "username": username_property() }),
                vec!["group", "username"],
            ),
        )
        .with_identity_param("username"),
        OperationSpec::new(
            "remove_group_member",
            "Remove a user from a group.",
            RiskTier::Destructive,
            ToolCategory::Groups,
            create_schema(
                json!({ "group": group.clone(), "username": username_property() }),
                vec!["group", "username"],
            ),
        )
        .with_identity_param("username")
        .with_warning("The user loses access to the group's files, mail and course material."),
        OperationSpec::new(
            "delete_group",
            "Delete a group.",
            RiskTier::Critical,
            ToolCategory::Groups,
            create_schema(json!({ "group": group }), vec!["group"]),
        )
        .with_warning("Deletes the group and every file shared in it."),
    ]
}

// ============================================================================
// Courses
// ============================================================================

fn courses() -> Vec<OperationSpec> {
    let course_id = json!({ "type": "string", "description": "Course identifier" });

    vec![
        OperationSpec::new(
            "list_courses",
            "List courses, optionally filtered by class or teacher.",
            RiskTier::Safe,
            ToolCategory::Courses,
            create_schema(
                json!({
                    "class": { "type": "string", "description": "Class name" },
                    "teacher": username_property()
                }),
                vec![],
            ),
        )
        .with_identity_param("teacher"),
        OperationSpec::new(
            "get_course",
            "Get course details.",
            RiskTier::Safe,
            ToolCategory::Courses,
            create_schema(json!({ "course_id": course_id.clone() }), vec!["course_id"]),
        ),
        OperationSpec::new(
            "enroll_student",
            "Enroll a student in a course.",
            RiskTier::Moderate,
            ToolCategory::Courses,
            create_schema(
                json!({ "course_id": course_id.clone(), "username": username_property() }),
                vec!["course_id", "username"],
            ),
        )
        .with_identity_param("username"),
        OperationSpec::new(
            "unenroll_student",
            "Remove a student from a course.",
            RiskTier::Destructive,
            ToolCategory::Courses,
            create_schema(
                json!({ "course_id": course_id.clone(), "username": username_property() }),
                vec!["course_id", "username"],
            ),
        )
        .with_identity_param("username")
        .with_warning("The student's submissions and grades for this course are archived."),
        OperationSpec::new(
            "delete_course",
            "Delete a course.",
            RiskTier::Critical,
            ToolCategory::Courses,
            create_schema(json!({ "course_id": course_id }), vec!["course_id"]),
        )
        .with_warning("Removes the course with all grades, assignments and attendance records."),
    ]
}

// ============================================================================
// Absences
// ============================================================================

fn absences() -> Vec<OperationSpec> {
    let absence_id = json!({ "type": "string", "description": "Absence record identifier" });

    vec![
        OperationSpec::new(
            "list_absences",
            "List absences, optionally for one student and date range. Records carry reason codes (EXC, UNX, MED, LAT, SCH, LEA).",
            RiskTier::Safe,
            ToolCategory::Absences,
            create_schema(
                json!({
                    "username": username_property(),
                    "from": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                    "to": { "type": "string", "description": "End date (YYYY-MM-DD)" }
                }),
                vec![],
            ),
        )
        .with_identity_param("username"),
        OperationSpec::new(
            "report_absence",
            "Record an absence for a student.",
            RiskTier::Moderate,
            ToolCategory::Absences,
            create_schema(
                json!({
                    "username": username_property(),
                    "date": { "type": "string", "description": "Date (YYYY-MM-DD)" },
                    "reason_code": {
                        "type": "string",
                        "enum": ["EXC", "UNX", "MED", "LAT", "SCH", "LEA"],
                        "description": "Absence reason code"
                    },
                    "note": { "type": "string", "description": "Free-text note" }
                }),
                vec!["username", "date", "reason_code"],
            ),
        )
        .with_identity_param("username"),
        OperationSpec::new(
            "excuse_absence",
            "Mark an absence as excused.",
            RiskTier::Moderate,
            ToolCategory::Absences,
            create_schema(
                json!({
                    "absence_id": absence_id.clone(),
                    "note": { "type": "string", "description": "Excuse note" }
                }),
                vec!["absence_id"],
            ),
        ),
        OperationSpec::new(
            "delete_absence",
            "Delete an absence record.",
            RiskTier::Destructive,
            ToolCategory::Absences,
            create_schema(json!({ "absence_id": absence_id }), vec!["absence_id"]),
        )
        .with_warning("The absence disappears from the attendance record and from report-card totals."),
    ]
}

// ============================================================================
// Timetable
// ============================================================================

fn timetable() -> Vec<OperationSpec> {
    vec![
        OperationSpec::new(
            "get_timetable",
            "Get the timetable of a class or a person for a given week.",
            RiskTier::Safe,
            ToolCategory::Timetable,
            create_schema(
                json!({
                    "class": { "type": "string", "description": "Class name" },
                    "username": username_property(),
                    "week": { "type": "string", "description": "Any date within the week (YYYY-MM-DD)" }
                }),
                vec![],
            ),
        )
        .with_identity_param("username"),
        OperationSpec::new(
            "list_substitutions",
            "List substitutions and cancelled lessons for a day.",
            RiskTier::Safe,
            ToolCategory::Timetable,
            create_schema(
                json!({ "date": { "type": "string", "description": "Date (YYYY-MM-DD)" } }),
                vec![],
            ),
        ),
    ]
}

// ============================================================================
// Rooms
// ============================================================================

fn rooms() -> Vec<OperationSpec> {
    vec![
        OperationSpec::new(
            "list_rooms",
            "List rooms and their availability.",
            RiskTier::Safe,
            ToolCategory::Rooms,
            create_schema(
                json!({ "date": { "type": "string", "description": "Date (YYYY-MM-DD)" } }),
                vec![],
            ),
        ),
        OperationSpec::new(
            "book_room",
            "Book a room for a time slot.",
            RiskTier::Moderate,
            ToolCategory::Rooms,
            create_schema(
                json!({
                    "room": { "type": "string", "description": "Room name" },
                    "date": { "type": "string", "description": "Date (YYYY-MM-DD)" },
                    "start": { "type": "string", "description": "Start time (HH:MM)" },
                    "end": { "type": "string", "description": "End time (HH:MM)" },
                    "purpose": { "type": "string", "description": "Booking purpose" }
                }),
                vec!["room", "date", "start", "end"],
            ),
        ),
        OperationSpec::new(
            "cancel_room_booking",
            "Cancel a room booking.",
            RiskTier::Destructive,
            ToolCategory::Rooms,
            create_schema(
                json!({ "booking_id": { "type": "string", "description": "Booking identifier" } }),
                vec!["booking_id"],
            ),
        ),
    ]
}

// ============================================================================
// Exams
// ============================================================================

fn exams() -> Vec<OperationSpec> {
    vec![
        OperationSpec::new(
            "list_exams",
            "List scheduled exams.",
            RiskTier::Safe,
            ToolCategory::Exams,
            create_schema(
                json!({ "class": { "type": "string", "description": "Class name" } }),
                vec![],
            ),
        ),
        OperationSpec::new(
            "schedule_exam",
            "Schedule an exam for a course.",
            RiskTier::Moderate,
            ToolCategory::Exams,
            create_schema(
                json!({
                    "course_id": { "type": "string", "description": "Course identifier" },
                    "date": { "type": "string", "description": "Date (YYYY-MM-DD)" },
                    "title": { "type": "string", "description": "Exam title" }
                }),
                vec!["course_id", "date", "title"],
            ),
        ),
        OperationSpec::new(
            "delete_exam",
            "Delete a scheduled exam.",
            RiskTier::Destructive,
            ToolCategory::Exams,
            create_schema(
                json!({ "exam_id": { "type": "string", "description": "Exam identifier" } }),
                vec!["exam_id"],
            ),
        )
        .with_warning("Grades already entered for this exam are removed."),
    ]
}

// ============================================================================
// Messaging
// ============================================================================

fn messaging() -> Vec<OperationSpec> {
    vec![OperationSpec::new(
        "send_message",
        "Send an internal message to users or groups.",
        RiskTier::Moderate,
        ToolCategory::Messaging,
        create_schema(
            json!({
                "recipients": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Account names or group names"
                },
                "subject": { "type": "string", "description": "Message subject" },
                "body": { "type": "string", "description": "Message body" }
            }),
            vec!["recipients", "subject", "body"],
        ),
    )
    .with_warning("Messages are delivered immediately and cannot be recalled.")]
}

// ============================================================================
// System
// ============================================================================

fn system() -> Vec<OperationSpec> {
    vec![OperationSpec::new(
        "get_system_info",
        "Get version and status information of the school server.",
        RiskTier::Safe,
        ToolCategory::System,
        create_schema(json!({}), vec![]),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_operations_are_safe() {
        for op in SchoolOperations::all() {
            if op.name.starts_with("get_") || op.name.starts_with("list_") || op.name.starts_with("search_") {
                assert_eq!(op.tier, RiskTier::Safe, "{}", op.name);
            }
        }
    }

    #[test]
    fn test_deletions_are_gated() {
        for op in SchoolOperations::all() {
            if op.name.starts_with("delete_") {
                assert!(op.tier.is_gated(), "{}", op.name);
            }
        }
    }
}
