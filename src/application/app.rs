use crate::application::checkout::Checkout;
use crate::application::session::{Screen, SessionEvent, SessionState, TransitionError};
use crate::config::Config;
use crate::domain::course::Course;
use crate::domain::payment::{FormField, PaymentMethod};
use crate::domain::ports::{CatalogBox, GatewayHandle};
use crate::domain::user::User;
use crate::error::{LearnHubError, Result};
use crate::interfaces::receipt;
use std::path::PathBuf;

/// A user action, as issued by a view or read from a session script.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { email: String, name: String },
    SelectCourse { course_id: String },
    SelectMethod(PaymentMethod),
    SetField { field: FormField, value: String },
    Pay,
    Back,
    DownloadReceipt,
    Logout,
}

/// What a handled command produced besides the new screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    ReceiptSaved(PathBuf),
}

/// Everything one browsing session owns: settings, catalog, gateway, the
/// session state machine and the checkout of the payment screen.
///
/// Views read from it; commands are the only way to change it.
pub struct SessionContext {
    config: Config,
    catalog: CatalogBox,
    gateway: GatewayHandle,
    courses: Vec<Course>,
    state: SessionState,
    checkout: Option<Checkout>,
}

impl SessionContext {
    /// Opens a session on the login screen. The course list is read once.
    pub async fn open(config: Config, catalog: CatalogBox, gateway: GatewayHandle) -> Result<Self> {
        let courses = catalog.courses().await?;
        Ok(Self {
            config,
            catalog,
            gateway,
            courses,
            state: SessionState::Auth,
            checkout: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    /// The active checkout; present only on the payment screen.
    pub fn checkout(&self) -> Option<&Checkout> {
        self.checkout.as_ref()
    }

    /// Applies one command. A rejected command leaves the session as it was.
    pub async fn handle(&mut self, command: Command) -> Result<Outcome> {
        let screen = self.screen();
        let result = self.apply(command).await;
        if let Err(e) = &result {
            tracing::warn!(screen = %screen, error = %e, "command rejected");
        }
        result
    }

    async fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Login { email, name } => {
                self.require(Screen::Auth, "login")?;
                let user = User::login(&email, &name)?;
                self.dispatch(SessionEvent::LoggedIn(user))?;
            }
            Command::SelectCourse { course_id } => {
                self.require(Screen::Courses, "course selected")?;
                let course = self.catalog.course(&course_id).await?;
                let course = course.ok_or(LearnHubError::CourseNotFound(course_id))?;
                self.dispatch(SessionEvent::CourseSelected(course))?;
            }
            Command::SelectMethod(method) => {
                self.checkout_mut("select payment method")?
                    .select_method(method)?;
            }
            Command::SetField { field, value } => {
                self.checkout_mut("edit payment form")?
                    .set_field(field, &value)?;
            }
            Command::Pay => {
                let purchase = self.checkout_mut("pay")?.pay().await?;
                self.dispatch(SessionEvent::PaymentConfirmed(purchase))?;
            }
            Command::Back => {
                let event = match self.screen() {
                    Screen::Success => SessionEvent::BackToCourses,
                    _ => SessionEvent::Back,
                };
                self.dispatch(event)?;
            }
            Command::DownloadReceipt => {
                let purchase = self.state.purchase().ok_or(TransitionError {
                    screen: self.screen(),
                    event: "download receipt",
                })?;
                let path = receipt::write_receipt(&self.config.receipt_dir, purchase)?;
                return Ok(Outcome::ReceiptSaved(path));
            }
            Command::Logout => self.dispatch(SessionEvent::Logout)?,
        }
        Ok(Outcome::Updated)
    }

    fn require(&self, screen: Screen, event: &'static str) -> Result<()> {
        if self.screen() == screen {
            Ok(())
        } else {
            Err(TransitionError {
                screen: self.screen(),
                event,
            }
            .into())
        }
    }

    fn checkout_mut(&mut self, event: &'static str) -> Result<&mut Checkout> {
        let screen = self.screen();
        self.checkout
            .as_mut()
            .ok_or_else(|| TransitionError { screen, event }.into())
    }

    /// Runs the reducer and keeps the checkout in step with the new screen.
    fn dispatch(&mut self, event: SessionEvent) -> Result<()> {
        let from = self.screen();
        let current = std::mem::take(&mut self.state);
        let result = match current.reduce(event) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err((unchanged, e)) => {
                self.state = unchanged;
                Err(e.into())
            }
        };

        match &self.state {
            SessionState::Payment { user, course } => {
                if self.checkout.is_none() {
                    self.checkout = Some(Checkout::new(
                        course.clone(),
                        user.clone(),
                        self.gateway.clone(),
                    ));
                }
            }
            // leaving the payment screen tears the checkout down
            _ => self.checkout = None,
        }

        if result.is_ok() {
            tracing::info!(from = %from, to = %self.screen(), "screen changed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ValidationError;
    use crate::infrastructure::in_memory::StaticCatalog;
    use crate::infrastructure::simulated_gateway::SimulatedGateway;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Duration;

    async fn context(receipt_dir: PathBuf) -> SessionContext {
        let config = Config {
            receipt_dir,
            gateway_delay: Duration::ZERO,
            ..Config::default()
        };
        SessionContext::open(
            config,
            Box::new(StaticCatalog::new()),
            Arc::new(SimulatedGateway::new(Duration::ZERO)),
        )
        .await
        .unwrap()
    }

    fn login() -> Command {
        Command::Login {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
        }
    }

    fn select(id: &str) -> Command {
        Command::SelectCourse {
            course_id: id.to_string(),
        }
    }

    fn field(field: FormField, value: &str) -> Command {
        Command::SetField {
            field,
            value: value.to_string(),
        }
    }

    async fn run(ctx: &mut SessionContext, commands: Vec<Command>) {
        for command in commands {
            ctx.handle(command).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_upi_purchase_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path().to_path_buf()).await;

        run(
            &mut ctx,
            vec![
                login(),
                select("6"),
                Command::SelectMethod(PaymentMethod::Upi),
                field(FormField::UpiId, "ana@okbank"),
                Command::Pay,
            ],
        )
        .await;

        assert_eq!(ctx.screen(), Screen::Success);
        assert!(ctx.checkout().is_none());
        let purchase = ctx.state().purchase().unwrap();
        assert_eq!(purchase.amount().value(), dec!(3999));
        assert_eq!(purchase.course().id, "6");
        assert!(purchase.transaction_id().as_str().starts_with("TXN"));

        let outcome = ctx.handle(Command::DownloadReceipt).await.unwrap();
        let Outcome::ReceiptSaved(path) = outcome else {
            panic!("expected a receipt");
        };
        assert!(path.starts_with(dir.path()));
        assert!(std::fs::read_to_string(path).unwrap().contains("Payment Method: UPI"));
    }

    #[tokio::test]
    async fn test_validation_error_stays_on_payment() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path().to_path_buf()).await;
        run(&mut ctx, vec![login(), select("1")]).await;

        let result = ctx.handle(Command::Pay).await;
        assert!(matches!(
            result,
            Err(LearnHubError::ValidationError(ValidationError::CardNumber))
        ));
        assert_eq!(ctx.screen(), Screen::Payment);
        assert_eq!(
            ctx.checkout().unwrap().error(),
            Some(&ValidationError::CardNumber)
        );
    }

    #[tokio::test]
    async fn test_back_resets_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path().to_path_buf()).await;
        run(
            &mut ctx,
            vec![login(), select("1"), field(FormField::UpiId, "ana@upi")],
        )
        .await;

        ctx.handle(Command::Back).await.unwrap();
        assert_eq!(ctx.screen(), Screen::Courses);
        assert!(ctx.state().selected_course().is_none());
        assert!(ctx.checkout().is_none());

        ctx.handle(select("1")).await.unwrap();
        assert_eq!(ctx.checkout().unwrap().form().upi_id, "");
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path().to_path_buf()).await;
        run(&mut ctx, vec![login(), select("2")]).await;

        ctx.handle(Command::Logout).await.unwrap();
        assert_eq!(ctx.state(), &SessionState::Auth);
        assert!(ctx.checkout().is_none());
    }

    #[tokio::test]
    async fn test_rejected_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path().to_path_buf()).await;

        assert!(matches!(
            ctx.handle(select("1")).await,
            Err(LearnHubError::TransitionError(_))
        ));
        assert!(matches!(
            ctx.handle(Command::Pay).await,
            Err(LearnHubError::TransitionError(_))
        ));
        assert!(matches!(
            ctx.handle(Command::DownloadReceipt).await,
            Err(LearnHubError::TransitionError(_))
        ));

        ctx.handle(login()).await.unwrap();
        assert!(matches!(
            ctx.handle(select("42")).await,
            Err(LearnHubError::CourseNotFound(id)) if id == "42"
        ));
        assert_eq!(ctx.screen(), Screen::Courses);
    }

    #[tokio::test]
    async fn test_login_requires_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path().to_path_buf()).await;
        let result = ctx
            .handle(Command::Login {
                email: "ana@example.com".to_string(),
                name: " ".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(LearnHubError::ValidationError(ValidationError::MissingName))
        ));
        assert_eq!(ctx.screen(), Screen::Auth);
    }
}
