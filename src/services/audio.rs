//! Audible alerts through the terminal bell

use std::time::Duration;
use tokio::{
    io::{self, AsyncWrite, AsyncWriteExt},
    time::sleep,
};
use tracing::debug;

const BELL: &[u8] = b"\x07";

/// One tone of an alert pattern.
///
/// The terminal bell has no pitch or volume control; frequency and volume are
/// kept so the patterns stay distinguishable in logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beep {
    pub frequency_hz: u32,
    pub duration: Duration,
    pub volume: f32,
}

/// A step in an alert pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertStep {
    Tone(Beep),
    Gap(Duration),
}

impl Beep {
    pub const fn new(frequency_hz: u32, duration_ms: u64, volume: f32) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
            volume,
        }
    }
}

/// Three rising-and-falling beeps played at completion
pub fn timer_alert_pattern() -> Vec<AlertStep> {
    vec![
        AlertStep::Tone(Beep::new(800, 200, 0.3)),
        AlertStep::Gap(Duration::from_millis(100)),
        AlertStep::Tone(Beep::new(1000, 200, 0.3)),
        AlertStep::Gap(Duration::from_millis(100)),
        AlertStep::Tone(Beep::new(800, 300, 0.3)),
    ]
}

/// A single quiet beep played when the warning window opens
pub fn warning_beep_pattern() -> Vec<AlertStep> {
    vec![AlertStep::Tone(Beep::new(600, 150, 0.2))]
}

/// Play a pattern on `out`, holding each tone for its duration
pub async fn play_pattern<W>(out: &mut W, pattern: &[AlertStep]) -> Result<(), String>
where
    W: AsyncWrite + Unpin,
{
    for step in pattern {
        match step {
            AlertStep::Tone(beep) => {
                debug!(
                    "Beep {}Hz at volume {:.1} for {:?}",
                    beep.frequency_hz, beep.volume, beep.duration
                );
                out.write_all(BELL)
                    .await
                    .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
                out.flush()
                    .await
                    .map_err(|e| format!("Failed to flush terminal bell: {}", e))?;
                sleep(beep.duration).await;
            }
            AlertStep::Gap(gap) => sleep(*gap).await,
        }
    }
    Ok(())
}

/// Play the completion alert on stdout
pub async fn play_timer_alert() -> Result<(), String> {
    play_pattern(&mut io::stdout(), &timer_alert_pattern()).await
}

/// Play the warning beep on stdout
pub async fn play_warning_beep() -> Result<(), String> {
    play_pattern(&mut io::stdout(), &warning_beep_pattern()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_duration(pattern: &[AlertStep]) -> Duration {
        pattern
            .iter()
            .map(|step| match step {
                AlertStep::Tone(beep) => beep.duration,
                AlertStep::Gap(gap) => *gap,
            })
            .sum()
    }

    #[test]
    fn alert_pattern_shape() {
        let pattern = timer_alert_pattern();
        let tones: Vec<u32> = pattern
            .iter()
            .filter_map(|step| match step {
                AlertStep::Tone(beep) => Some(beep.frequency_hz),
                AlertStep::Gap(_) => None,
            })
            .collect();
        assert_eq!(tones, vec![800, 1000, 800]);
        assert_eq!(total_duration(&pattern), Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn rings_once_per_tone() {
        let mut out = Vec::new();
        play_pattern(&mut out, &timer_alert_pattern()).await.unwrap();
        assert_eq!(out, b"\x07\x07\x07");

        let mut out = Vec::new();
        play_pattern(&mut out, &warning_beep_pattern()).await.unwrap();
        assert_eq!(out, b"\x07");
    }
}
