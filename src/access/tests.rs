//! Unit tests for the authorization table.

use super::{AccessDenied, Action, Role, authorize, is_allowed};
use rstest::rstest;

#[rstest]
#[case(Action::CreateProject, false, true, true)]
#[case(Action::ListOwnProjects, false, true, true)]
#[case(Action::AddBacklogTasks, false, true, true)]
#[case(Action::FinalizeSprint, false, true, true)]
#[case(Action::ViewReports, false, true, true)]
#[case(Action::ManageUsers, false, false, true)]
#[case(Action::ApprovePromotion, false, false, true)]
#[case(Action::CreateSprintFromBacklog, true, true, true)]
#[case(Action::SubmitDailyReport, true, true, true)]
#[case(Action::SubmitTaskForReview, true, true, true)]
#[case(Action::ViewOwnTasks, true, true, true)]
#[case(Action::StartOwnTask, true, true, true)]
#[case(Action::ReviewOthersTasks, true, true, true)]
fn action_table_matches_expected_roles(
    #[case] action: Action,
    #[case] developer: bool,
    #[case] product_owner: bool,
    #[case] ceo: bool,
) {
    assert_eq!(is_allowed(Role::Developer, action), developer);
    assert_eq!(is_allowed(Role::ProductOwner, action), product_owner);
    assert_eq!(is_allowed(Role::Ceo, action), ceo);
}

#[rstest]
fn authorize_reports_role_and_action_on_denial() {
    let result = authorize(Role::Developer, Action::ManageUsers);

    assert_eq!(
        result,
        Err(AccessDenied {
            role: Role::Developer,
            action: Action::ManageUsers,
        })
    );
}

#[rstest]
fn denial_message_names_the_action() {
    let denied = AccessDenied {
        role: Role::ProductOwner,
        action: Action::ApprovePromotion,
    };

    assert_eq!(
        denied.to_string(),
        "role ProductOwner may not approve promotions"
    );
}

#[rstest]
#[case("Developer", Role::Developer)]
#[case("ProductOwner", Role::ProductOwner)]
#[case(" CEO ", Role::Ceo)]
fn role_parses_storage_form(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(raw), Ok(expected));
}

#[rstest]
fn role_rejects_unknown_value() {
    assert!(Role::try_from("Intern").is_err());
}

#[rstest]
fn role_round_trips_through_storage_form() {
    for role in Role::ALL {
        assert_eq!(Role::try_from(role.as_str()), Ok(role));
    }
}
