//! Executes parsed commands against the session and the `SQLite` backend.

use super::{Cli, Command, DocCommand, MilestoneCommand, NewObjectiveArgs, TxCommand};
use crate::{
    ai::GeminiClient,
    config::{app::AppConfig, database, env},
    core::{
        document, milestone,
        objective::{self, NewObjective},
        seed, transaction,
    },
    entities::objective as objective_entity,
    errors::{Error, Result},
    routes::{self, Navigation, Route},
    screens::{
        DashboardScreen, DocumentForm, DocumentsScreen, FinanceScreen, GoalSelectionScreen,
        LoginScreen, ObjectivesScreen, SettingsScreen, StaticAuthenticator, TransactionForm,
    },
    session::{SessionStore, SystemStateStorage},
};
use chrono::{Local, NaiveDate};
use sea_orm::DatabaseConnection;

/// Everything a command needs: configuration, database and the restored session.
pub struct App {
    config: AppConfig,
    db: DatabaseConnection,
    user_id: String,
    session: SessionStore<SystemStateStorage>,
    today: NaiveDate,
}

impl App {
    /// Connects to the database, creates missing tables, seeds the configured objectives
    /// and restores the session.
    pub async fn start(config: AppConfig, database_url: &str, user_id: String) -> Result<Self> {
        let db = database::create_connection(database_url)
            .await
            .inspect(|_| tracing::info!("Database connection established"))
            .inspect_err(|e| tracing::error!("Failed to connect to database: {e}"))?;
        database::create_tables(&db).await?;
        seed::seed_objectives(&db, &config, &user_id).await?;

        let session = SessionStore::restore(SystemStateStorage::new(db.clone())).await?;
        Ok(Self {
            config,
            db,
            user_id,
            session,
            today: Local::now().date_naive(),
        })
    }

    /// Runs one command and returns the text to print.
    pub async fn run(&mut self, cli: Cli) -> Result<String> {
        match cli.command {
            Command::Login { email, password } => self.login(email, password).await,
            Command::Logout => {
                self.session.logout().await?;
                Ok("Sessão encerrada.\n".to_string())
            }
            Command::Objectives => self.open(Route::SelectObjective.path()).await,
            Command::NewObjective(args) => self.new_objective(args).await,
            Command::Select { id } => self.select(&id).await,
            Command::Clear => {
                self.require(Route::SelectObjective)?;
                self.session.clear_objective().await?;
                self.open(Route::SelectObjective.path()).await
            }
            Command::Open { path } => self.open(&path).await,
            Command::Tx { command } => self.transactions(command).await,
            Command::Milestone { command } => self.milestones(command).await,
            Command::Doc { command } => self.documents(command).await,
        }
    }

    async fn login(&mut self, email: String, password: String) -> Result<String> {
        let authenticator = StaticAuthenticator::new(&self.config.auth);
        let mut form = LoginScreen::new();
        form.email = email;
        form.password = password;

        if form.submit(&authenticator, &mut self.session).await? {
            return self.open(Route::SelectObjective.path()).await;
        }
        Ok(form
            .error()
            .map_or_else(|| "Preencha e-mail e senha.\n".to_string(), |e| format!("{e}\n")))
    }

    /// Checks the guards for `route`, mapping redirects to errors.
    fn require(&self, route: Route) -> Result<()> {
        match routes::resolve(
            self.session.login_state(),
            self.session.objective_id(),
            route.path(),
        ) {
            Navigation::Render(_) => Ok(()),
            Navigation::Redirect(Route::SelectObjective) => Err(Error::NoObjectiveSelected),
            Navigation::Redirect(_) | Navigation::Pending => Err(Error::NotLoggedIn),
        }
    }

    /// Active objective, after the guards for `route` passed.
    ///
    /// The stored copy is refreshed from the backend so a stale session cannot reach
    /// another user's objective. An id that no longer resolves is dropped from the
    /// session and reported as [`Error::NoObjectiveSelected`].
    async fn active_objective(&mut self, route: Route) -> Result<objective_entity::Model> {
        self.require(route)?;
        let id = self
            .session
            .objective_id()
            .ok_or(Error::NoObjectiveSelected)?
            .to_string();

        match objective::get_user_objective(&self.db, &self.user_id, &id).await {
            Err(Error::ObjectiveNotFound { .. }) => {
                tracing::warn!("Stored objective {id} is gone for user {}, clearing it", self.user_id);
                self.session.clear_objective().await?;
                Err(Error::NoObjectiveSelected)
            }
            found => found,
        }
    }

    fn category_hint(&self) -> String {
        format!("Categorias: {}\n", self.config.categories.join(", "))
    }

    async fn new_objective(&mut self, args: NewObjectiveArgs) -> Result<String> {
        self.require(Route::SelectObjective)?;
        let mut screen = GoalSelectionScreen::load(&self.db, &self.user_id).await?;
        let created = screen
            .create(
                &self.db,
                NewObjective {
                    user_id: self.user_id.clone(),
                    name: args.name,
                    target_amount: args.target,
                    target_currency: args.currency.into(),
                    deadline: args.deadline,
                    description: args.description,
                },
            )
            .await?;
        tracing::info!("Created objective {}", created.id);
        screen.render()
    }

    async fn select(&mut self, objective_id: &str) -> Result<String> {
        self.require(Route::SelectObjective)?;
        let screen = GoalSelectionScreen::load(&self.db, &self.user_id).await?;
        let next = screen.select(objective_id, &mut self.session).await?;

        if let Some(objective) = self.session.objective().cloned() {
            seed::seed_objective_data(&self.db, &self.config, &objective).await?;
        }
        self.open(next.path()).await
    }

    /// Resolves `path` through the guards and renders the resulting page.
    ///
    /// A stored objective that no longer exists redirects to the objective picker.
    pub async fn open(&mut self, path: &str) -> Result<String> {
        let (route, mut out) =
            match routes::resolve(self.session.login_state(), self.session.objective_id(), path) {
                Navigation::Render(route) => (route, String::new()),
                Navigation::Redirect(route) => (route, format!("-> {route}\n")),
                Navigation::Pending => return Ok("Carregando...\n".to_string()),
            };

        match self.render(route).await {
            Ok(page) => out.push_str(&page),
            Err(Error::NoObjectiveSelected) if route.requires_objective() => {
                out = format!("-> {}\n", Route::SelectObjective);
                out.push_str(&self.render(Route::SelectObjective).await?);
            }
            Err(e) => return Err(e),
        }
        Ok(out)
    }

    async fn render(&mut self, route: Route) -> Result<String> {
        match route {
            Route::Login => Ok("Entrar: fingoal login <e-mail> <senha>\n".to_string()),
            Route::SelectObjective => {
                GoalSelectionScreen::load(&self.db, &self.user_id)
                    .await?
                    .render()
            }
            Route::Dashboard => {
                let objective = self.active_objective(route).await?;
                DashboardScreen::load(&self.db, &objective, self.today)
                    .await?
                    .render()
            }
            Route::Finance => {
                let objective = self.active_objective(route).await?;
                let page = FinanceScreen::load(&self.db, &objective, self.config.exchange_rates)
                    .await?
                    .render("")?;
                Ok(page + &self.category_hint())
            }
            Route::Objectives => {
                let objective = self.active_objective(route).await?;
                ObjectivesScreen::load(&self.db, &objective.id).await?.render()
            }
            Route::Documents => {
                let objective = self.active_objective(route).await?;
                let page = DocumentsScreen::load(&self.db, &objective.id)
                    .await?
                    .render("")?;
                Ok(page + &self.category_hint())
            }
            Route::Settings => SettingsScreen::load(&self.db, &self.user_id).await?.render(),
        }
    }

    async fn transactions(&mut self, command: TxCommand) -> Result<String> {
        let objective = self.active_objective(Route::Finance).await?;
        let mut screen =
            FinanceScreen::load(&self.db, &objective, self.config.exchange_rates).await?;

        match command {
            TxCommand::Add {
                kind,
                amount,
                description,
                category,
                currency,
                date,
            } => {
                let form = TransactionForm {
                    kind: kind.into(),
                    amount,
                    currency: currency.into(),
                    category,
                    description,
                    date: date.unwrap_or(self.today),
                };
                match screen.add(&form) {
                    Some(record) => {
                        transaction::insert_transaction(&self.db, &record).await?;
                    }
                    None => tracing::warn!("Transaction not added: missing field or amount"),
                }
                screen.render("")
            }
            TxCommand::Rm { id } => {
                if screen.remove(&id).is_some() {
                    transaction::delete_transaction(&self.db, &id).await?;
                }
                screen.render("")
            }
            TxCommand::Search { query } => screen.render(&query),
        }
    }

    async fn milestones(&mut self, command: MilestoneCommand) -> Result<String> {
        let objective = self.active_objective(Route::Objectives).await?;
        let mut screen = ObjectivesScreen::load(&self.db, &objective.id).await?;

        match command {
            MilestoneCommand::Add { title, description } => {
                match screen.add_manual(&title, &description) {
                    Some(record) => {
                        milestone::insert_milestone(&self.db, &record).await?;
                    }
                    None => tracing::warn!("Milestone not added: title is empty"),
                }
            }
            MilestoneCommand::Toggle { id } => {
                if let Some(done) = screen.toggle(&id) {
                    milestone::set_milestone_completed(&self.db, &id, done).await?;
                }
            }
            MilestoneCommand::Rm { id } => {
                if screen.remove(&id).is_some() {
                    milestone::delete_milestone(&self.db, &id).await?;
                }
            }
            MilestoneCommand::Generate => {
                let client = GeminiClient::new(&self.config.ai, env::get_ai_api_key())?;
                for record in screen.generate(&client, &objective).await {
                    match milestone::insert_milestone(&self.db, &record).await {
                        Err(Error::Validation { message }) => {
                            tracing::warn!("Suggested milestone not stored: {message}");
                        }
                        other => {
                            other?;
                        }
                    }
                }
            }
        }
        screen.render()
    }

    async fn documents(&mut self, command: DocCommand) -> Result<String> {
        let objective = self.active_objective(Route::Documents).await?;
        let mut screen = DocumentsScreen::load(&self.db, &objective.id).await?;

        match command {
            DocCommand::Add {
                name,
                category,
                file_type,
            } => {
                let form = DocumentForm {
                    name,
                    category,
                    file_type: file_type.into(),
                };
                match screen.add(&form, self.today) {
                    Some(record) => {
                        document::insert_document(&self.db, &record).await?;
                    }
                    None => tracing::warn!("Document not added: name is empty"),
                }
                screen.render("")
            }
            DocCommand::Rm { id } => {
                if screen.remove(&id).is_some() {
                    document::delete_document(&self.db, &id).await?;
                }
                screen.render("")
            }
            DocCommand::Search { query } => screen.render(&query),
        }
    }
}

/// Builds the application from the environment and runs `cli`.
pub async fn run(cli: Cli) -> Result<String> {
    let config = crate::config::app::load_config(&cli.config)?;
    let mut app = App::start(config, &database::get_database_url(), env::get_user_id()).await?;
    app.run(cli).await
}
