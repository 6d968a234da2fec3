//! Command handlers.
//!
//! Chart computation failures propagate and exit non-zero with a single
//! message. Fortune failures never do: the chart stays printed and the
//! user gets an inline hint to retry.

use std::io::Write as _;

use anyhow::Context as _;
use chrono::Datelike;

use zendestiny_chart::{calculate_bazi, SexagenaryCalendar};
use zendestiny_core::{AppConfig, BaziResult, Gender, Language, SavedProfile};
use zendestiny_fortune::{ChatSession, FortuneCache, GeminiClient};
use zendestiny_store::{JsonFileStore, ProfileStore};

use crate::BirthArgs;

fn derive_chart(birth: &BirthArgs) -> anyhow::Result<BaziResult> {
    let gender: Gender = birth
        .gender
        .parse()
        .with_context(|| format!("--gender must be male or female, got '{}'", birth.gender))?;
    let chart = calculate_bazi(
        &SexagenaryCalendar::new(),
        &birth.date,
        &birth.time,
        gender,
        &birth.place,
    )?;
    Ok(chart)
}

fn resolve_language(config: &AppConfig, lang: Option<&str>) -> anyhow::Result<Language> {
    match lang {
        Some(code) => code
            .parse()
            .with_context(|| format!("--lang must be en or zh, got '{code}'")),
        None => Ok(config.language),
    }
}

fn gemini_client(config: &AppConfig) -> anyhow::Result<GeminiClient> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .context("GEMINI_API_KEY is not set; fortune and chat commands need it")?;
    let client = GeminiClient::with_base_url(
        api_key,
        &config.gemini_model,
        config.http_timeout_secs,
        &config.gemini_base_url,
    )?;
    Ok(client)
}

/// The chart rendered as a small table plus the cycle timeline.
pub(crate) fn render_chart(chart: &BaziResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "BaZi chart: born {} in {} ({})\n\n",
        chart.birth_instant(),
        chart.birth_place,
        chart.gender,
    ));
    for (label, pillar) in [
        ("Year ", &chart.year_pillar),
        ("Month", &chart.month_pillar),
        ("Day  ", &chart.day_pillar),
        ("Hour ", &chart.hour_pillar),
    ] {
        let animal = pillar.branch_animal.to_string();
        let animal = if animal.is_empty() {
            String::new()
        } else {
            format!("  ({animal})")
        };
        out.push_str(&format!(
            "  {label}  {pillar}  {}/{}{animal}\n",
            pillar.stem_element, pillar.branch_element,
        ));
    }
    out.push_str(&format!(
        "\nDay Master: {} ({})\n",
        chart.day_master,
        chart.day_pillar.stem_element,
    ));
    if chart.da_yun.is_empty() {
        out.push_str("\nNo luck cycles available.\n");
    } else {
        out.push_str("\nLuck cycles:\n");
        for cycle in &chart.da_yun {
            out.push_str(&format!(
                "  ages {:>2}-{:<2}  from {}  {}{}\n",
                cycle.start_age, cycle.end_age, cycle.start_year, cycle.stem, cycle.branch,
            ));
        }
    }
    out
}

pub(crate) fn run_chart(config: &AppConfig, birth: &BirthArgs, save: bool) -> anyhow::Result<()> {
    let chart = derive_chart(birth)?;
    print!("{}", render_chart(&chart));

    if save {
        let store = JsonFileStore::new(&config.data_path);
        let profiles = ProfileStore::new(&store);
        let profile = SavedProfile::new(
            chart.birth_place.clone(),
            chart.birth_date,
            chart.birth_time,
            chart.gender,
        );
        if profiles.insert(&profile)? {
            println!("\nProfile saved ({}).", profile.id);
        } else {
            println!("\nProfile already in history, not saved again.");
        }
    }
    Ok(())
}

pub(crate) async fn run_fortune(
    config: &AppConfig,
    birth: &BirthArgs,
    refresh: bool,
    lang: Option<&str>,
) -> anyhow::Result<()> {
    let chart = derive_chart(birth)?;
    print!("{}", render_chart(&chart));

    let language = resolve_language(config, lang)?;
    let client = gemini_client(config)?;
    let store = JsonFileStore::new(&config.data_path);
    let cache = FortuneCache::new(&store);
    let today = chrono::Local::now().date_naive();

    println!("\nConsulting today's fortune...");
    let fetch = || client.generate_fortune(&chart, language, today);
    let fortune = if refresh {
        cache.refresh(&chart, language, today, fetch).await
    } else {
        cache.get_or_fetch(&chart, language, today, fetch).await
    };

    match fortune {
        Some(fortune) => {
            println!("\nDaily fortune for {today}: score {}/100", fortune.score);
            println!("  {}", fortune.summary);
            println!("\n  {}", fortune.analysis);
            println!("\n  Advice: {}", fortune.advice);
            println!("  Lucky color: {}  Lucky direction: {}", fortune.lucky_color, fortune.lucky_direction);
        }
        None => {
            println!("\nToday's fortune is unavailable right now. Run again (or with --refresh) to retry.");
        }
    }
    Ok(())
}

pub(crate) async fn run_chat(
    config: &AppConfig,
    birth: &BirthArgs,
    lang: Option<&str>,
) -> anyhow::Result<()> {
    let chart = derive_chart(birth)?;
    print!("{}", render_chart(&chart));

    let language = resolve_language(config, lang)?;
    let client = gemini_client(config)?;
    let current_year = chrono::Local::now().year();
    let mut session = ChatSession::new(&client, &chart, language, current_year);

    println!("\n{}", session.greeting());
    println!("(type 'exit' to leave)\n");

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }
        print!("\nmaster> ");
        std::io::stdout().flush()?;
        let outcome = session
            .send_streamed(message, |chunk| {
                print!("{chunk}");
                let _ = std::io::stdout().flush();
            })
            .await;
        match outcome {
            Ok(_) => println!("\n"),
            Err(e) => {
                tracing::warn!(error = %e, "chat turn failed");
                println!("\nThe consultation was interrupted. Please ask again.\n");
            }
        }
    }
    Ok(())
}

pub(crate) fn run_profiles_list(config: &AppConfig) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&config.data_path);
    let profiles = ProfileStore::new(&store).list()?;
    if profiles.is_empty() {
        println!("No saved profiles.");
        return Ok(());
    }
    for profile in profiles {
        println!(
            "{}  {}  {} {}  {}",
            profile.id, profile.birth_place, profile.birth_date, profile.birth_time, profile.gender,
        );
    }
    Ok(())
}

pub(crate) fn run_profiles_delete(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let id: uuid::Uuid = id.parse().context("profile id must be a UUID")?;
    let store = JsonFileStore::new(&config.data_path);
    if ProfileStore::new(&store).delete(id)? {
        println!("Profile {id} deleted.");
    } else {
        println!("No profile with id {id}.");
    }
    Ok(())
}
