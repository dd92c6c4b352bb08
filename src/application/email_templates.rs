/// Confirmation email sent after a successful waitlist registration.
/// Returns `(subject, html)`.
pub fn confirmation_email(first_name: &str, last_name: Option<&str>) -> (String, String) {
    let subject = "Willkommen beim Munich Funding Summit - Anmeldung bestätigt!".to_string();

    let full_name = match last_name {
        Some(last) if !last.is_empty() && !first_name.is_empty() => {
            format!("{first_name} {last}")
        }
        _ => first_name.to_string(),
    };
    // Quick signups carry no name; fall back to a plain greeting.
    let greeting = if full_name.is_empty() {
        "Hallo,".to_string()
    } else {
        format!("Hallo {full_name},")
    };

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h1 style="color: #333; text-align: center;">Willkommen beim Munich Funding Summit!</h1>

  <p>{greeting}</p>

  <p>vielen Dank für Ihre Anmeldung zum Munich Funding Summit! Wir freuen uns sehr, Sie bald bei unserem Event begrüßen zu dürfen.</p>

  <div style="background-color: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="color: #333; margin-top: 0;">Was passiert als nächstes?</h3>
    <ul style="color: #666;">
      <li>Sie erhalten regelmäßige Updates zum Event</li>
      <li>Weitere Details zum Programm und den Speakern</li>
      <li>Informationen zu Networking-Möglichkeiten</li>
    </ul>
  </div>

  <p>Falls Sie Fragen haben, können Sie uns jederzeit kontaktieren.</p>

  <p>Beste Grüße,<br>
  Das Munich Funding Summit Team</p>

  <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
  <p style="font-size: 12px; color: #999; text-align: center;">
    Diese E-Mail wurde automatisch generiert. Bitte antworten Sie nicht auf diese E-Mail.
  </p>
</div>"#
    );

    (subject, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_detailed_registrants_by_full_name() {
        let (subject, html) = confirmation_email("Max", Some("Mustermann"));
        assert!(subject.contains("Munich Funding Summit"));
        assert!(html.contains("Hallo Max Mustermann,"));
    }

    #[test]
    fn quick_signups_get_a_plain_greeting() {
        let (_, html) = confirmation_email("", None);
        assert!(html.contains("<p>Hallo,</p>"));
        assert!(!html.contains("Hallo ,"));
    }
}
