use dialoguer::{theme::ColorfulTheme, Input, Select};
use timeseddel::{
    application::controller::{Activity, TimesheetController},
    domain::Month,
    ports::command_handler::{Command, CommandHandler},
};
use tracing::{debug, instrument, warn};

const DAY_CHOICES: std::ops::RangeInclusive<u8> = 1..=31;

/// Terminal front end: menus in, confirmations and errors out.
pub struct CliAdapter {
    controller: TimesheetController,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("controller", &self.controller)
            .finish()
    }
}

enum MenuChoice {
    Login,
    Register,
    ChangeMonth,
    Quit,
}

/// Runs a `dialoguer` prompt on the blocking pool so the runtime keeps driving other tasks
/// while the terminal waits for input.
async fn prompt<T, F>(ask: F) -> Result<T, Box<dyn std::error::Error>>
where
    T: Send + 'static,
    F: FnOnce(&ColorfulTheme) -> Result<T, dialoguer::Error> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(move || ask(&ColorfulTheme::default())).await??;
    Ok(answer)
}

impl CliAdapter {
    pub fn new(controller: TimesheetController) -> Self {
        Self { controller }
    }

    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let follower = self.follow_activity();

        loop {
            let command = match self.menu().await? {
                MenuChoice::Quit => break,
                MenuChoice::Login => Command::Login,
                MenuChoice::ChangeMonth => match self.pick_month().await? {
                    Some(index) => Command::SelectMonth { index },
                    None => continue,
                },
                MenuChoice::Register => {
                    self.fill_form().await?;
                    Command::SubmitEntry
                }
            };
            self.dispatch(command).await;
        }

        follower.abort();
        Ok(())
    }

    /// Mirrors activity changes into the log while the app runs.
    fn follow_activity(&self) -> tokio::task::JoinHandle<()> {
        let mut activity = self.controller.subscribe();
        tokio::spawn(async move {
            while activity.changed().await.is_ok() {
                let current = *activity.borrow_and_update();
                if current == Activity::Idle {
                    debug!("Idle");
                } else {
                    debug!(activity = %current, "Busy");
                }
            }
        })
    }

    async fn dispatch(&mut self, command: Command) {
        match self.controller.handle(command).await {
            Ok(message) => println!("✅ {}", message),
            Err(report) => {
                warn!("Command failed: {:?}", report);
                println!("❌ {}", report.current_context());
            }
        }
    }

    async fn menu(&self) -> Result<MenuChoice, Box<dyn std::error::Error>> {
        if !self.controller.is_logged_in() {
            let choice = prompt(|theme| {
                Select::with_theme(theme)
                    .with_prompt("Timeseddel")
                    .items(&["Log ind med Google", "Afslut"])
                    .default(0)
                    .interact()
            })
            .await?;
            return Ok(match choice {
                0 => MenuChoice::Login,
                _ => MenuChoice::Quit,
            });
        }

        let items = [
            "Registrer tid".to_string(),
            format!("Skift måned ({})", self.controller.form().month),
            "Afslut".to_string(),
        ];
        let choice = prompt(move |theme| {
            Select::with_theme(theme)
                .with_prompt("Timeseddel")
                .items(&items)
                .default(0)
                .interact()
        })
        .await?;
        Ok(match choice {
            0 => MenuChoice::Register,
            1 => MenuChoice::ChangeMonth,
            _ => MenuChoice::Quit,
        })
    }

    async fn pick_month(&self) -> Result<Option<usize>, Box<dyn std::error::Error>> {
        let current = self.controller.form().month.index();
        prompt(move |theme| {
            Select::with_theme(theme)
                .with_prompt("Måned")
                .items(&Month::names())
                .default(current)
                .interact_opt()
        })
        .await
    }

    /// Asks for every field, prefilled with what the form already holds so a failed
    /// submission can be resent by pressing enter through the prompts.
    async fn fill_form(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let form = self.controller.form().clone();
        let filled = prompt(move |theme| {
            let days = DAY_CHOICES.map(|day| day.to_string()).collect::<Vec<_>>();
            let day_index = Select::with_theme(theme)
                .with_prompt(format!("Dag ({})", form.month))
                .items(&days)
                .default(form.day.map(|day| usize::from(day).saturating_sub(1)).unwrap_or(0))
                .interact()?;

            let mut filled = form.clone();
            filled.day = u8::try_from(day_index + 1).ok();
            filled.start = Some(text(theme, "Start (TT:MM)", form.start.as_deref().unwrap_or(""))?);
            filled.end = Some(text(theme, "Slut (TT:MM)", form.end.as_deref().unwrap_or(""))?);
            filled.activity_type = text(theme, "Type", &form.activity_type)?;
            filled.description = text(theme, "Beskrivelse", &form.description)?;
            Ok(filled)
        })
        .await?;

        *self.controller.form_mut() = filled;
        Ok(())
    }
}

fn text(theme: &ColorfulTheme, label: &str, initial: &str) -> Result<String, dialoguer::Error> {
    Input::<String>::with_theme(theme)
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_runs_off_the_runtime_thread() {
        let runtime_thread = std::thread::current().id();

        let prompt_thread = prompt(|_| Ok(std::thread::current().id())).await.unwrap();

        assert_ne!(prompt_thread, runtime_thread);
    }

    #[tokio::test]
    async fn test_prompt_error_is_returned() {
        let result = prompt(|_| -> Result<usize, dialoguer::Error> {
            Err(dialoguer::Error::IO(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )))
        })
        .await;

        assert!(result.unwrap_err().to_string().contains("stdin closed"));
    }
}
