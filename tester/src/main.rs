//! Drives the full inscription flow against a running proxy server.
//!
//! ```sh
//! cargo run -p tester -- --benefit "Fútbol 5" \
//!     --first-name Ana --last-name Diaz --student-id 12345 \
//!     --career informática --email ana@itba.edu.ar --phone 1122334455
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use inscription::auth::{Access, AuthContext};
use inscription::benefits::{schedule_key, BenefitType};
use inscription::careers;
use inscription::client::PortalClient;
use inscription::wizard::Wizard;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Proxy server to exercise.
    #[arg(long, default_value = "http://localhost:4000")]
    base_url: String,

    /// Benefit name to inscribe into, as listed by the catalogue.
    #[arg(long)]
    benefit: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    student_id: String,

    /// Career name or a fragment of it, resolved like the form dropdown.
    #[arg(long)]
    career: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    /// Language level, only meaningful for language benefits.
    #[arg(long)]
    level: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let career = resolve_career(&args.career)?;
    let client = PortalClient::new(&args.base_url);

    let catalogue = client
        .fetch_benefits()
        .await
        .context("catalogue fetch failed")?;
    let benefit = catalogue
        .find(&args.benefit)
        .with_context(|| format!("benefit {:?} not found in the catalogue", args.benefit))?;

    println!("Inscribing into {} ({:?})", benefit.name(), benefit.benefit_type());

    let mut wizard = Wizard::new(benefit);

    wizard.form.personal.first_name = args.first_name;
    wizard.form.personal.last_name = args.last_name;
    wizard.form.personal.student_id = args.student_id;
    wizard.form.personal.career = career;

    if !wizard.advance() {
        bail!("step 1 rejected: {}", last_error(&wizard));
    }
    println!("Personal data accepted");

    wizard.form.contact.email = args.email.clone();
    wizard.form.contact.phone = args.phone;
    wizard.form.contact.notes = args.notes.unwrap_or_default();

    if !wizard.advance() {
        bail!("step 2 rejected: {}", last_error(&wizard));
    }
    println!("Contact data accepted");

    if wizard.benefit().benefit_type() == BenefitType::Language {
        let level = args
            .level
            .or_else(|| wizard.benefit().levels().first().cloned())
            .unwrap_or_else(|| "n/a".to_string());

        println!("Selected level {level}");
        wizard.form.preferences.language_level = Some(level);
    }

    if let Some(time) = wizard.benefit().times().first().cloned() {
        let key = schedule_key(&time);
        println!("Selected schedule {key}");
        wizard.form.toggle_schedule(&key);
    }

    wizard.form.preferences.terms_accepted = true;

    #[cfg(feature = "verbose")]
    println!("Form about to be submitted: {:#?}", wizard.form);

    if !wizard.submit(&client).await {
        bail!("submission failed: {}", last_error(&wizard));
    }
    println!("Inscription confirmed (step {})", wizard.step().number());

    // The directory only knows staff members; absence is not a failure.
    match client.fetch_user(&args.email).await {
        Ok(user) => {
            let context = AuthContext::authenticated(user);
            println!("Back office access: {}", context.authorize(Access::Any));
        }
        Err(err) => println!("No directory entry for {}: {err}", args.email),
    }

    Ok(())
}

fn resolve_career(search: &str) -> anyhow::Result<String> {
    if careers::is_valid(search) {
        return Ok(search.to_string());
    }

    match careers::matching(search)[..] {
        [career] => Ok(career.to_string()),
        [] => bail!("no career matches {search:?}"),
        ref many => bail!(
            "career {search:?} is ambiguous: {}",
            many.join(", ")
        ),
    }
}

fn last_error(wizard: &Wizard) -> &str {
    wizard.last_error().unwrap_or("unknown error")
}
