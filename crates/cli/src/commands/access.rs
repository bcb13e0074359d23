//! Page access check

use std::io;

use saffron::{
    auth::AuthSession,
    routes::{GuardDecision, Route, guard},
};

use crate::errors::CliError;

pub(crate) fn run(
    path: &str,
    session: &AuthSession,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let route: Route = path.parse()?;

    let role = session
        .role()
        .map_or_else(|| "anonymous".to_string(), |role| role.to_string());

    match guard(&route, session) {
        GuardDecision::Allow => writeln!(out, "{route}: allowed ({role})")?,
        GuardDecision::SignIn { login, return_to } => {
            writeln!(out, "{route}: sign in at {login}, then continue to {return_to}")?;
        }
        GuardDecision::Unauthorized => {
            writeln!(out, "{route}: not allowed for {role}, sent to {}", Route::Unauthorized)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use saffron::auth::{Role, User, UserId};
    use testresult::TestResult;

    use super::*;

    fn session(role: Role) -> AuthSession {
        AuthSession::new(
            User {
                id: UserId::new("u1"),
                name: "Asha".to_string(),
                role,
                email: None,
                phone: None,
            },
            "token",
        )
    }

    fn check(path: &str, session: &AuthSession) -> TestResult<String> {
        let mut out = Vec::new();

        run(path, session, &mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn anonymous_admin_visit_goes_to_staff_login() -> TestResult {
        assert_eq!(
            check("/admin/reports?range=week", &AuthSession::default())?,
            "/admin/reports: sign in at /staff/login, then continue to /admin/reports\n"
        );

        Ok(())
    }

    #[test]
    fn staff_cannot_open_admin_pages() -> TestResult {
        assert_eq!(
            check("/admin", &session(Role::Staff))?,
            "/admin: not allowed for STAFF, sent to /unauthorized\n"
        );

        Ok(())
    }

    #[test]
    fn public_pages_are_open() -> TestResult {
        assert_eq!(
            check("/menu/", &AuthSession::default())?,
            "/menu: allowed (anonymous)\n"
        );

        Ok(())
    }

    #[test]
    fn unknown_paths_are_errors() {
        let mut out = Vec::new();

        let result = run("/nowhere", &AuthSession::default(), &mut out);

        assert!(matches!(result, Err(CliError::Route(_))));
    }
}
