use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input};
use pomo_core::domain::{MAX_DURATION_MINUTES, MAX_LONG_BREAK_AFTER};
use pomo_core::{Config, NotificationConfig, TimerConfig};

#[derive(Debug)]
struct InitAnswers {
    pomodoro_minutes: u64,
    short_break_minutes: u64,
    long_break_minutes: u64,
    long_break_after: u32,
    notifications_enabled: bool,
    sound_enabled: bool,
}

impl InitAnswers {
    fn into_config(self) -> Config {
        Config {
            timer: TimerConfig {
                pomodoro_minutes: self.pomodoro_minutes,
                short_break_minutes: self.short_break_minutes,
                long_break_minutes: self.long_break_minutes,
                long_break_after: self.long_break_after,
                ..TimerConfig::default()
            },
            notifications: NotificationConfig {
                enabled: self.notifications_enabled,
                sound_enabled: self.sound_enabled,
                ..NotificationConfig::default()
            },
        }
    }
}

pub fn execute(force: bool) -> Result<()> {
    let config_path = Config::config_path();

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if force && config_path.exists() {
        println!("Overwriting the existing configuration.\n");
    }

    println!("Welcome to pomo! Let's set up your sessions.\n");

    let config = prompt_answers()?.into_config();
    config
        .validate()
        .context("the answers do not form a valid configuration")?;
    config
        .save_to(&config_path)
        .context("failed to write the configuration file")?;

    println!("\nConfiguration saved: {}", config_path.display());
    println!("Run `pomo start` to begin your first pomodoro.");

    Ok(())
}

fn prompt_minutes(prompt: &str, default: u64) -> Result<u64> {
    let minutes = Input::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|input: &u64| {
            if (1..=MAX_DURATION_MINUTES).contains(input) {
                Ok(())
            } else {
                Err(format!("Enter a value between 1 and {}", MAX_DURATION_MINUTES))
            }
        })
        .interact_text()?;

    Ok(minutes)
}

fn prompt_answers() -> Result<InitAnswers> {
    let defaults = TimerConfig::default();

    let pomodoro_minutes = prompt_minutes("Pomodoro length (minutes)", defaults.pomodoro_minutes)?;
    let short_break_minutes =
        prompt_minutes("Short break length (minutes)", defaults.short_break_minutes)?;
    let long_break_minutes =
        prompt_minutes("Long break length (minutes)", defaults.long_break_minutes)?;

    let long_break_after: u32 = Input::new()
        .with_prompt("Pomodoros before a long break")
        .default(defaults.long_break_after)
        .validate_with(|input: &u32| {
            if (1..=MAX_LONG_BREAK_AFTER).contains(input) {
                Ok(())
            } else {
                Err(format!("Enter a value between 1 and {}", MAX_LONG_BREAK_AFTER))
            }
        })
        .interact_text()?;

    let notifications_enabled = Confirm::new()
        .with_prompt("Show desktop notifications?")
        .default(true)
        .interact()?;

    let sound_enabled = notifications_enabled
        && Confirm::new()
            .with_prompt("Play a sound with notifications?")
            .default(true)
            .interact()?;

    Ok(InitAnswers {
        pomodoro_minutes,
        short_break_minutes,
        long_break_minutes,
        long_break_after,
        notifications_enabled,
        sound_enabled,
    })
}
