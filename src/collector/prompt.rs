//! Terminal prompts that fill an `OnboardingForm` line by line.

use std::io;

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, Lines};

use super::form::{FormField, OnboardingForm};
use crate::onboarding::model::Weekday;

/// Walk through every field, then every weekday.
///
/// Required fields left blank and numbers that do not parse are asked
/// again. Returns `Ok(false)` if input ends before the form is complete.
pub async fn fill_form<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    form: &mut OnboardingForm,
) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for field in FormField::ALL {
        loop {
            let marker = if field.is_required() { " *" } else { "" };
            write_flush(out, &format!("{}{marker}: ", field.label())).await?;

            let Some(line) = lines.next_line().await? else {
                return Ok(false);
            };
            let line = line.trim_end_matches('\r');

            if field.is_required() && line.trim().is_empty() {
                write_flush(out, &format!("  {} is required\n", field.label())).await?;
                continue;
            }

            match form.set(field, line) {
                Ok(()) => break,
                Err(e) => write_flush(out, &format!("  {e}\n")).await?,
            }
        }
    }

    write_flush(out, "Vegetarian days\n").await?;
    for day in Weekday::ALL {
        write_flush(out, &format!("  {day}? [y/N]: ")).await?;
        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        form.set_day(day, is_yes(&line));
    }

    Ok(true)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn write_flush<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncBufReadExt;

    use super::*;

    async fn run(input: &'static str) -> (bool, OnboardingForm, String) {
        let mut lines = input.as_bytes().lines();
        let mut out = Vec::new();
        let mut form = OnboardingForm::default();
        let complete = fill_form(&mut lines, &mut out, &mut form).await.unwrap();
        (complete, form, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn fills_every_field_and_day() {
        let input = "+15550100\na@example.com\n30\n175.5\n80\n72\nvegan-ish\nnuts, gluten\n\
                     y\nn\nyes\n\n\nY\nno\n";
        let (complete, form, _) = run(input).await;

        assert!(complete);
        assert_eq!(form.whatsapp_number, "+15550100");
        assert_eq!(form.age, Some(30));
        assert_eq!(form.height_cm, Some(175.5));
        assert_eq!(form.allergies, "nuts, gluten");
        assert_eq!(
            form.veg_days.selected(),
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Saturday]
        );
    }

    #[tokio::test]
    async fn reprompts_blank_required_and_bad_numbers() {
        let input = "\n+15550100\na@example.com\nthirty\n30\n170\n70\n65\n\n\n\n\n\n\n\n\n\n";
        let (complete, form, out) = run(input).await;

        assert!(complete);
        assert!(out.contains("WhatsApp number is required"));
        assert!(out.contains("age must be a number"));
        assert_eq!(form.age, Some(30));
        assert_eq!(form.preferences, "");
        assert!(form.missing_required().is_empty());
    }

    #[tokio::test]
    async fn early_eof_reports_incomplete() {
        let (complete, form, _) = run("+15550100\na@example.com\n").await;
        assert!(!complete);
        assert_eq!(form.email, "a@example.com");
        assert!(form.age.is_none());
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes(" Y "));
        assert!(is_yes("yes"));
        assert!(!is_yes(""));
        assert!(!is_yes("nope"));
    }
}
