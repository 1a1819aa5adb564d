use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use anyhow::Result;
use crossterm::{
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use project_tracker::config::{self, Config};
use project_tracker::db::{self, StoreResult};
use project_tracker::session::Session;
use project_tracker::ui::{
    login::{LoginState, LoginAction, render_login, handle_input as handle_login_input},
    home::{HomeState, HomeAction, render_home, handle_input as handle_home_input},
    projects::{ProjectsState, ProjectAction, render_projects, handle_input as handle_projects_input, load_projects},
    people::{PeopleState, PeopleAction, render_people, handle_input as handle_people_input, load_people},
    task_detail::{TaskDetailState, TaskDetailAction, render_task_detail, handle_input as handle_task_detail_input, load_task_detail},
    employee_wizard::{EmployeeWizardState, EmployeeWizardAction, render_employee_wizard, handle_input as handle_employee_wizard_input},
    project_wizard::{ProjectWizardState, ProjectWizardAction, render_project_wizard, handle_input as handle_project_wizard_input},
    task_wizard::{TaskWizardState, TaskWizardAction, render_task_wizard, handle_input as handle_task_wizard_input},
};

// Represents the current screen in the app
enum AppScreen {
    Login,
    Home,
    Projects,
    People,
    TaskDetail,
    EmployeeWizard,
    ProjectWizard,
    TaskWizard,
}

// Main application state
struct AppState {
    db: db::Database,
    config: Config,
    session: Session,
    screen: AppScreen,
    login_state: LoginState,
    home_state: HomeState,
    projects_state: Option<ProjectsState>,
    people_state: Option<PeopleState>,
    task_detail_state: Option<TaskDetailState>,
    employee_wizard_state: Option<EmployeeWizardState>,
    project_wizard_state: Option<ProjectWizardState>,
    task_wizard_state: Option<TaskWizardState>,
}

impl AppState {
    fn new(db: db::Database, config: Config) -> Self {
        Self {
            db,
            config,
            session: Session::browse_only(),
            screen: AppScreen::Login,
            login_state: LoginState::new(),
            home_state: HomeState::new(),
            projects_state: None,
            people_state: None,
            task_detail_state: None,
            employee_wizard_state: None,
            project_wizard_state: None,
            task_wizard_state: None,
        }
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;
    init_logging(&config)?;
    println!("Initializing project tracker...");

    let db = db::init(&config).await?;
    println!("Database ready at {}", config.database_url());

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(db, config);

    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "application stopped");
        println!("Error: {}", err);
    }

    info!("shutdown");
    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        // Render current screen
        terminal.draw(|f| {
            let session = &app_state.session;
            match app_state.screen {
                AppScreen::Login => render_login(f, &mut app_state.login_state),
                AppScreen::Home => render_home(f, &mut app_state.home_state, session),
                AppScreen::Projects => {
                    if let Some(state) = &mut app_state.projects_state {
                        render_projects(f, state, session);
                    }
                }
                AppScreen::People => {
                    if let Some(state) = &mut app_state.people_state {
                        render_people(f, state, session);
                    }
                }
                AppScreen::TaskDetail => {
                    if let Some(state) = &mut app_state.task_detail_state {
                        render_task_detail(f, state, session);
                    }
                }
                AppScreen::EmployeeWizard => {
                    if let Some(state) = &mut app_state.employee_wizard_state {
                        render_employee_wizard(f, state);
                    }
                }
                AppScreen::ProjectWizard => {
                    if let Some(state) = &mut app_state.project_wizard_state {
                        render_project_wizard(f, state);
                    }
                }
                AppScreen::TaskWizard => {
                    if let Some(state) = &mut app_state.task_wizard_state {
                        render_task_wizard(f, state);
                    }
                }
            }
        })?;

        // Handle input for current screen
        let should_quit = match app_state.screen {
            AppScreen::Login => handle_login_screen(app_state)?,
            AppScreen::Home => handle_home_screen(app_state).await?,
            AppScreen::Projects => handle_projects_screen(app_state).await?,
            AppScreen::People => handle_people_screen(app_state).await?,
            AppScreen::TaskDetail => handle_task_detail_screen(app_state).await?,
            AppScreen::EmployeeWizard => handle_employee_wizard_screen(app_state).await?,
            AppScreen::ProjectWizard => handle_project_wizard_screen(app_state).await?,
            AppScreen::TaskWizard => handle_task_wizard_screen(app_state).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

async fn load_projects_screen(app_state: &mut AppState, select: Option<i64>) -> Result<()> {
    let mut state = load_projects(&app_state.db, &app_state.config).await?;
    if let Some(id) = select {
        state.select_project(id);
    }

    app_state.projects_state = Some(state);
    app_state.screen = AppScreen::Projects;

    Ok(())
}

async fn load_people_screen(app_state: &mut AppState, select: Option<i64>) -> Result<()> {
    let mut state = load_people(&app_state.db).await?;
    if let Some(id) = select {
        state.select_employee(id);
    }

    app_state.people_state = Some(state);
    app_state.screen = AppScreen::People;

    Ok(())
}

fn handle_login_screen(app_state: &mut AppState) -> Result<bool> {
    match handle_login_input(&mut app_state.login_state)? {
        Some(LoginAction::Exit) => return Ok(true),
        Some(LoginAction::Submit(password)) => {
            app_state.session = Session::login(&password, &app_state.config.admin_password);
            app_state.home_state = HomeState::new();
            app_state.screen = AppScreen::Home;
        }
        None => {}
    }

    Ok(false)
}

async fn handle_home_screen(app_state: &mut AppState) -> Result<bool> {
    match handle_home_input(&mut app_state.home_state)? {
        Some(HomeAction::Exit) => return Ok(true),
        Some(HomeAction::OpenProjects) => load_projects_screen(app_state, None).await?,
        Some(HomeAction::OpenPeople) => load_people_screen(app_state, None).await?,
        None => {}
    }

    Ok(false)
}

async fn handle_projects_screen(app_state: &mut AppState) -> Result<bool> {
    let session = app_state.session;
    if let Some(state) = &mut app_state.projects_state {
        match handle_projects_input(state, &session)? {
            Some(ProjectAction::Back) => {
                app_state.screen = AppScreen::Home;
            }
            Some(ProjectAction::NewProject) => {
                let employees = app_state.db.get_employees().await?;
                app_state.project_wizard_state = Some(ProjectWizardState::new(&employees));
                app_state.screen = AppScreen::ProjectWizard;
            }
            Some(ProjectAction::EditProject(project_id)) => {
                let project = app_state.db.get_project(project_id).await?;
                let employees = app_state.db.get_employees().await?;
                app_state.project_wizard_state =
                    Some(ProjectWizardState::from_existing(project, &employees));
                app_state.screen = AppScreen::ProjectWizard;
            }
            Some(ProjectAction::DeleteProject(project_id)) => {
                app_state.db.delete_project(project_id).await?;
                load_projects_screen(app_state, None).await?;
            }
            Some(ProjectAction::NewTask(project_id)) => {
                let employees = app_state.db.get_employees().await?;
                app_state.task_wizard_state = Some(TaskWizardState::new(project_id, &employees));
                app_state.screen = AppScreen::TaskWizard;
            }
            Some(ProjectAction::ViewTask(task_id)) => {
                app_state.task_detail_state = Some(load_task_detail(&app_state.db, task_id).await?);
                app_state.screen = AppScreen::TaskDetail;
            }
            None => {}
        }
    }

    Ok(false)
}

async fn handle_people_screen(app_state: &mut AppState) -> Result<bool> {
    let session = app_state.session;
    if let Some(state) = &mut app_state.people_state {
        match handle_people_input(state, &session)? {
            Some(PeopleAction::Back) => {
                app_state.screen = AppScreen::Home;
            }
            Some(PeopleAction::NewPerson) => {
                app_state.employee_wizard_state = Some(EmployeeWizardState::new());
                app_state.screen = AppScreen::EmployeeWizard;
            }
            Some(PeopleAction::EditPerson(employee_id)) => {
                let employee = app_state.db.get_employee(employee_id).await?;
                app_state.employee_wizard_state = Some(EmployeeWizardState::from_existing(employee));
                app_state.screen = AppScreen::EmployeeWizard;
            }
            Some(PeopleAction::DeletePerson(employee_id)) => {
                app_state.db.delete_employee(employee_id).await?;
                load_people_screen(app_state, None).await?;
            }
            None => {}
        }
    }

    Ok(false)
}

async fn handle_task_detail_screen(app_state: &mut AppState) -> Result<bool> {
    let session = app_state.session;
    if let Some(state) = &mut app_state.task_detail_state {
        let project_id = state.project_id();
        match handle_task_detail_input(state, &session)? {
            Some(TaskDetailAction::Back) => {
                load_projects_screen(app_state, Some(project_id)).await?;
            }
            Some(TaskDetailAction::EditTask(_)) => {
                let task = state.task().clone();
                let employees = app_state.db.get_employees().await?;
                app_state.task_wizard_state = Some(TaskWizardState::from_existing(task, &employees));
                app_state.screen = AppScreen::TaskWizard;
            }
            Some(TaskDetailAction::DeleteTask(task_id)) => {
                app_state.db.delete_task(task_id).await?;
                load_projects_screen(app_state, Some(project_id)).await?;
            }
            None => {}
        }
    }

    Ok(false)
}

/// Store errors from a submit stay on the form; the form remains open.
fn report_submit<T>(result: StoreResult<T>, set_error: impl FnOnce(String)) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(error = %err, "submit failed");
            set_error(err.to_string());
            None
        }
    }
}

async fn handle_employee_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.employee_wizard_state {
        match handle_employee_wizard_input(state)? {
            Some(EmployeeWizardAction::Cancel) => {
                let select = Some(state.employee.id).filter(|id| *id != 0);
                load_people_screen(app_state, select).await?;
            }
            Some(EmployeeWizardAction::Save(employee)) => {
                let result = if employee.id == 0 {
                    app_state.db.create_employee(&employee).await
                } else {
                    app_state.db.update_employee(&employee).await.map(|_| employee.id)
                };

                if let Some(id) = report_submit(result, |err| state.set_error(err)) {
                    load_people_screen(app_state, Some(id)).await?;
                }
            }
            None => {}
        }
    }

    Ok(false)
}

async fn handle_project_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.project_wizard_state {
        match handle_project_wizard_input(state)? {
            Some(ProjectWizardAction::Cancel) => {
                let select = Some(state.project.id).filter(|id| *id != 0);
                load_projects_screen(app_state, select).await?;
            }
            Some(ProjectWizardAction::Save(draft)) => {
                let result = if draft.id == 0 {
                    app_state.db.create_project(&draft).await
                } else {
                    app_state.db.update_project(&draft).await.map(|_| draft.id)
                };

                if let Some(id) = report_submit(result, |err| state.set_error(err)) {
                    load_projects_screen(app_state, Some(id)).await?;
                }
            }
            None => {}
        }
    }

    Ok(false)
}

async fn handle_task_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.task_wizard_state {
        let project_id = state.project_id();
        match handle_task_wizard_input(state)? {
            Some(TaskWizardAction::Cancel) => {
                load_projects_screen(app_state, Some(project_id)).await?;
            }
            Some(TaskWizardAction::Save(draft)) => {
                let result = if draft.id == 0 {
                    app_state.db.create_task(&draft).await
                } else {
                    app_state.db.update_task(&draft).await.map(|_| draft.id)
                };

                if report_submit(result, |err| state.set_error(err)).is_some() {
                    load_projects_screen(app_state, Some(project_id)).await?;
                }
            }
            None => {}
        }
    }

    Ok(false)
}
