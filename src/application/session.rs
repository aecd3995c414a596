use crate::domain::course::Course;
use crate::domain::purchase::PurchaseDetails;
use crate::domain::user::User;
use std::fmt;
use thiserror::Error;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Courses,
    Payment,
    Success,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Auth => "auth",
            Screen::Courses => "courses",
            Screen::Payment => "payment",
            Screen::Success => "success",
        };
        f.write_str(name)
    }
}

/// Session state. Each variant carries exactly the data valid on its screen,
/// so a stale course or purchase cannot survive a step back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Auth,
    Courses {
        user: User,
    },
    Payment {
        user: User,
        course: Course,
    },
    Success {
        user: User,
        purchase: PurchaseDetails,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(User),
    CourseSelected(Course),
    PaymentConfirmed(PurchaseDetails),
    Back,
    BackToCourses,
    Logout,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::LoggedIn(_) => "login",
            SessionEvent::CourseSelected(_) => "course selected",
            SessionEvent::PaymentConfirmed(_) => "payment confirmed",
            SessionEvent::Back => "back",
            SessionEvent::BackToCourses => "back to courses",
            SessionEvent::Logout => "logout",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot handle '{event}' on the {screen} screen")]
pub struct TransitionError {
    pub screen: Screen,
    pub event: &'static str,
}

impl SessionState {
    pub fn screen(&self) -> Screen {
        match self {
            SessionState::Auth => Screen::Auth,
            SessionState::Courses { .. } => Screen::Courses,
            SessionState::Payment { .. } => Screen::Payment,
            SessionState::Success { .. } => Screen::Success,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Auth => None,
            SessionState::Courses { user }
            | SessionState::Payment { user, .. }
            | SessionState::Success { user, .. } => Some(user),
        }
    }

    pub fn selected_course(&self) -> Option<&Course> {
        match self {
            SessionState::Payment { course, .. } => Some(course),
            _ => None,
        }
    }

    pub fn purchase(&self) -> Option<&PurchaseDetails> {
        match self {
            SessionState::Success { purchase, .. } => Some(purchase),
            _ => None,
        }
    }

    /// Applies one event. Events the current screen does not accept are
    /// rejected and the state is returned untouched inside the error path.
    pub fn reduce(
        self,
        event: SessionEvent,
    ) -> Result<SessionState, (SessionState, TransitionError)> {
        use SessionEvent as E;
        use SessionState as S;

        match (self, event) {
            (_, E::Logout) => Ok(S::Auth),
            (S::Auth, E::LoggedIn(user)) => Ok(S::Courses { user }),
            (S::Courses { user }, E::CourseSelected(course)) => Ok(S::Payment { user, course }),
            (S::Payment { user, .. }, E::PaymentConfirmed(purchase)) => {
                Ok(S::Success { user, purchase })
            }
            (S::Payment { user, .. }, E::Back) => Ok(S::Courses { user }),
            (S::Success { user, .. }, E::BackToCourses | E::Back) => Ok(S::Courses { user }),
            (state, event) => {
                let error = TransitionError {
                    screen: state.screen(),
                    event: event.name(),
                };
                Err((state, error))
            }
        }
    }
}
