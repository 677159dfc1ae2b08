use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use vocabulary::Accent;

use crate::engine::Snapshot;
use crate::theme::ThemeVariant;
use crate::App;

/// Semantic palette resolved from the active theme variant. Screens use
/// these roles instead of hardcoded colors.
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub fg_muted: Color,
    pub accent: Color,
    pub error: Color,
    pub border: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 30),
            fg: Color::Rgb(220, 220, 220),
            fg_muted: Color::Rgb(150, 150, 150),
            accent: Color::Rgb(100, 160, 240),
            error: Color::Rgb(240, 80, 80),
            border: Color::Rgb(70, 70, 70),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(30, 30, 30),
            fg_muted: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(40, 100, 200),
            error: Color::Rgb(200, 50, 50),
            border: Color::Rgb(200, 200, 200),
        }
    }

    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }
}

// The word list is open-ended; anything not in these tables gets the
// default badge color.
const LEVEL_COLORS: &[(&str, Color)] = &[
    ("A1", Color::Green),
    ("A2", Color::Blue),
    ("B1", Color::Yellow),
    ("B2", Color::LightRed),
    ("C1", Color::Red),
    ("C2", Color::Magenta),
];

const PART_OF_SPEECH_COLORS: &[(&str, Color)] = &[
    ("noun", Color::Blue),
    ("verb", Color::Green),
    ("adjective", Color::Magenta),
    ("adverb", Color::LightRed),
    ("preposition", Color::LightMagenta),
    ("pronoun", Color::Yellow),
    ("conjunction", Color::LightBlue),
    ("indefinite article", Color::Gray),
];

const DEFAULT_BADGE_COLOR: Color = Color::DarkGray;

pub fn level_color(level: &str) -> Color {
    lookup(LEVEL_COLORS, level)
}

pub fn part_of_speech_color(part_of_speech: &str) -> Color {
    lookup(PART_OF_SPEECH_COLORS, part_of_speech)
}

fn lookup(table: &[(&str, Color)], key: &str) -> Color {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_BADGE_COLOR)
}

pub fn draw(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg).fg(palette.fg))
        .title(" Oxford 5000 flashcards ");
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    match app {
        App::Loading => draw_message(
            frame,
            inner_area,
            "Loading Oxford 5000 vocabulary...",
            Style::default().fg(palette.fg_muted),
        ),
        App::Failed(message) => draw_failure(frame, inner_area, palette, message),
        App::Ready(session) => {
            let snapshot = session.engine.snapshot();
            if snapshot.entry.is_some() {
                draw_card(frame, inner_area, palette, &snapshot);
            } else {
                draw_message(
                    frame,
                    inner_area,
                    "No vocabulary words available",
                    Style::default().fg(palette.fg_muted),
                );
            }
        }
    }
}

fn draw_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);
    frame.render_widget(Paragraph::new(text).style(style).centered(), chunks[1]);
}

fn draw_failure(frame: &mut Frame, area: Rect, palette: &Palette, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(palette.error))
            .centered(),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new("press r to retry")
            .style(Style::default().fg(palette.fg_muted))
            .centered(),
        chunks[2],
    );
}

fn draw_card(frame: &mut Frame, area: Rect, palette: &Palette, snapshot: &Snapshot) {
    let Some(entry) = snapshot.entry else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] position gauge
            Constraint::Length(1), // [1] counter
            Constraint::Length(1),
            Constraint::Length(1), // [3] headword
            Constraint::Length(1),
            Constraint::Length(1), // [5] accent selector
            Constraint::Length(1), // [6] phonetics
            Constraint::Length(1),
            Constraint::Length(1), // [8] badges
            Constraint::Length(1), // [9] thai translation
            Constraint::Min(1),
            Constraint::Length(1), // [11] auto-advance indicator
            Constraint::Length(1), // [12] controls
        ])
        .split(area);

    let ratio = (snapshot.index + 1) as f64 / snapshot.total.max(1) as f64;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.accent).bg(palette.bg))
        .ratio(ratio)
        .label("");
    frame.render_widget(gauge, chunks[0]);

    frame.render_widget(
        Paragraph::new(format!("{} / {}", snapshot.index + 1, snapshot.total))
            .style(Style::default().fg(palette.fg_muted))
            .right_aligned(),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(entry.word.as_str())
            .style(Style::default().fg(palette.fg).bold())
            .centered(),
        chunks[3],
    );

    frame.render_widget(
        Paragraph::new(Line::from(accent_selector(snapshot.accent, palette))).centered(),
        chunks[5],
    );

    let phonetic = match snapshot.accent {
        Accent::Us => format!("🇺🇸 {}", entry.us.phonetic),
        Accent::Uk => format!("🇬🇧 {}", entry.uk.phonetic),
    };
    frame.render_widget(
        Paragraph::new(phonetic)
            .style(Style::default().fg(palette.fg))
            .centered(),
        chunks[6],
    );

    let badges = Line::from(vec![
        badge(&entry.part_of_speech, part_of_speech_color(&entry.part_of_speech)),
        Span::raw("  "),
        badge(&entry.level, level_color(&entry.level)),
    ]);
    frame.render_widget(Paragraph::new(badges).centered(), chunks[8]);

    if let Some(thai) = &entry.thai {
        frame.render_widget(
            Paragraph::new(thai.as_str())
                .style(Style::default().fg(palette.fg_muted))
                .centered(),
            chunks[9],
        );
    }

    if snapshot.auto_advance {
        frame.render_widget(
            Paragraph::new("● ● ●")
                .style(Style::default().fg(palette.accent))
                .centered(),
            chunks[11],
        );
    }

    frame.render_widget(
        Paragraph::new("←/p prev  →/n next  space pause  a accent  s speak  t theme  q quit")
            .style(Style::default().fg(palette.fg_muted))
            .centered(),
        chunks[12],
    );
}

fn accent_selector<'a>(selected: Accent, palette: &Palette) -> Vec<Span<'a>> {
    let active = Style::default().fg(Color::Black).bg(palette.accent).bold();
    let inactive = Style::default().fg(palette.fg_muted);
    vec![
        Span::styled(
            format!(" {} ", Accent::Us.label()),
            if selected == Accent::Us { active } else { inactive },
        ),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", Accent::Uk.label()),
            if selected == Accent::Uk { active } else { inactive },
        ),
    ]
}

fn badge<'a>(text: &str, color: Color) -> Span<'a> {
    Span::styled(
        format!(" {text} "),
        Style::default().fg(Color::Black).bg(color),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AdvanceTimer, CardEngine};
    use crate::Session;
    use ratatui::backend::TestBackend;
    use vocabulary::{Pronunciation, VocabularyEntry};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw(frame, app, &Palette::dark()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn entry(word: &str) -> VocabularyEntry {
        let pronunciation = Pronunciation {
            mp3: format!("{word}.mp3"),
            ogg: format!("{word}.ogg"),
            phonetic: format!("/{word}/"),
        };
        VocabularyEntry {
            word: word.to_string(),
            part_of_speech: "noun".to_string(),
            level: "A1".to_string(),
            thai: Some("คำ".to_string()),
            us: pronunciation.clone(),
            uk: pronunciation,
            examples: Vec::new(),
        }
    }

    fn session_with(entries: Vec<VocabularyEntry>) -> Session {
        Session {
            engine: CardEngine::new(entries, vocabulary::Accent::Us),
            timer: AdvanceTimer::stopped(),
        }
    }

    #[test]
    fn known_categories_map_to_their_colors() {
        assert_eq!(level_color("A1"), Color::Green);
        assert_eq!(level_color("C2"), Color::Magenta);
        assert_eq!(part_of_speech_color("noun"), Color::Blue);
        assert_eq!(part_of_speech_color("indefinite article"), Color::Gray);
    }

    #[test]
    fn unknown_categories_fall_back_to_the_default_style() {
        assert_eq!(level_color("Z9"), DEFAULT_BADGE_COLOR);
        assert_eq!(part_of_speech_color("modal verb"), DEFAULT_BADGE_COLOR);
    }

    #[test]
    fn palettes_differ_between_variants() {
        assert_ne!(Palette::dark().bg, Palette::light().bg);
        assert_ne!(Palette::dark().fg, Palette::light().fg);
    }

    #[test]
    fn loading_screen_shows_progress_text() {
        assert!(render(&App::Loading).contains("Loading Oxford 5000 vocabulary"));
    }

    #[test]
    fn failed_screen_offers_a_retry() {
        let text = render(&App::Failed("no vocabulary words found in the file".into()));
        assert!(text.contains("no vocabulary words found"));
        assert!(text.contains("press r to retry"));
    }

    #[test]
    fn card_screen_shows_word_counter_and_translation() {
        let app = App::Ready(session_with(vec![entry("apple"), entry("banana")]));
        let text = render(&app);
        assert!(text.contains("apple"));
        assert!(text.contains("1 / 2"));
        assert!(text.contains("คำ"));
        assert!(text.contains("noun"));
    }

    #[test]
    fn empty_collection_renders_the_empty_state() {
        let app = App::Ready(session_with(Vec::new()));
        assert!(render(&app).contains("No vocabulary words available"));
    }
}
