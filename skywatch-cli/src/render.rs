use skywatch_core::{AlertDescriptor, RenderSurface, WeatherCard};

/// Materializes fragments as plain text on stdout. The three page regions
/// become consecutive blocks of output.
pub struct TerminalRenderer;

impl RenderSurface for TerminalRenderer {
    fn render_weather(&self, card: &WeatherCard) {
        match card {
            WeatherCard::Loading => println!("Loading weather..."),
            WeatherCard::Current {
                location,
                temperature_c,
                feels_like_c,
                humidity_pct,
                description,
            } => {
                println!();
                println!("{location}");
                println!("  {temperature_c:.0}°C – {description}");
                println!("  Feels like {feels_like_c:.0}°C · Humidity {humidity_pct:.0}%");
            }
            WeatherCard::NotFound { query } => {
                println!("Sorry, we couldn't find weather for \"{query}\".");
            }
            WeatherCard::MissingCredential => {
                println!("No API key configured. Run `skywatch configure` first.");
            }
        }
    }

    fn render_alert(&self, alert: Option<&AlertDescriptor>) {
        // An empty alert region needs no clearing on an append-only surface.
        let Some(alert) = alert else {
            return;
        };

        println!();
        println!(
            "[{}] {} ({})",
            alert.severity.as_str().to_uppercase(),
            alert.title,
            alert.icon.asset()
        );
        println!("  {}", alert.meta);
        for message in &alert.messages {
            println!("  - {message}");
        }
    }
}
