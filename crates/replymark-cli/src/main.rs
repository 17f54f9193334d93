use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets,
};
use replymark_config::Config;
use replymark_engine::{Block, ChunkDecoder, ResponseStream, render};
use std::{
    env,
    io::{Read, stdout},
    process,
    time::Duration,
};

// Palette for rendered blocks
const TEXT_COLOR: Color = Color::Rgb(200, 200, 195);
const BOLD_COLOR: Color = Color::Rgb(240, 240, 235);
const HEADING_H2_COLOR: Color = Color::Rgb(240, 190, 90);
const HEADING_H3_COLOR: Color = Color::Rgb(220, 170, 80);
const QUOTE_COLOR: Color = Color::Rgb(140, 160, 180);
const DIM_COLOR: Color = Color::Rgb(100, 100, 100);

enum Mode {
    Tui,
    Dump,
    Json,
}

struct Options {
    mode: Mode,
    chunk_size: Option<usize>,
    tick_ms: Option<u64>,
    path: String,
}

/// Replays a transcript: feeds byte chunks through the decoder into the
/// stream accumulator, flushing the decoder when the bytes run out.
struct App {
    stream: ResponseStream,
    decoder: ChunkDecoder,
    transcript: Vec<u8>,
    cursor: usize,
    chunk_size: usize,
    paused: bool,
}

impl App {
    fn new(transcript: Vec<u8>, chunk_size: usize) -> Self {
        Self {
            stream: ResponseStream::new(),
            decoder: ChunkDecoder::new(),
            transcript,
            cursor: 0,
            chunk_size,
            paused: false,
        }
    }

    fn finished(&self) -> bool {
        self.cursor >= self.transcript.len()
    }

    /// Delivers the next transport chunk, if any.
    fn feed_next(&mut self) {
        if self.finished() {
            return;
        }
        let end = (self.cursor + self.chunk_size).min(self.transcript.len());
        let text = self.decoder.push(&self.transcript[self.cursor..end]);
        self.cursor = end;
        if !text.is_empty() {
            self.stream.append(&text);
        }
        if self.finished() {
            // Stream teardown
            let tail = self.decoder.finish();
            if !tail.is_empty() {
                self.stream.append(&tail);
            }
            log::debug!(
                "replay finished: {} bytes, {} blocks",
                self.transcript.len(),
                self.stream.blocks().len()
            );
        }
    }

    /// Simulates the user starting a new request over the same transcript.
    fn restart(&mut self) {
        self.stream.reset();
        self.decoder = ChunkDecoder::new();
        self.cursor = 0;
        self.paused = false;
    }

    /// Runs the replay to completion without a UI.
    fn drain(&mut self) {
        while !self.finished() {
            self.feed_next();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let opts = match parse_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!(
                "Usage: replymark [--dump|--json] [--chunk N] [--tick MS] <transcript.md | ->"
            );
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Warning: ignoring config file: {e}");
            Config::default()
        }
    };
    let chunk_size = opts.chunk_size.unwrap_or(config.chunk_size).max(1);
    let tick = Duration::from_millis(opts.tick_ms.unwrap_or(config.tick_ms));

    let transcript = read_transcript(&opts.path)
        .with_context(|| format!("failed to read transcript '{}'", opts.path))?;

    let mut app = App::new(transcript, chunk_size);
    match opts.mode {
        Mode::Dump => {
            app.drain();
            println!("{}", render::to_text(app.stream.blocks()));
            Ok(())
        }
        Mode::Json => {
            app.drain();
            println!("{}", serde_json::to_string_pretty(app.stream.blocks())?);
            Ok(())
        }
        Mode::Tui => {
            if opts.path == "-" {
                eprintln!("Error: stdin transcripts need --dump or --json");
                process::exit(1);
            }
            run_tui(app, tick)
        }
    }
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut mode = Mode::Tui;
    let mut chunk_size = None;
    let mut tick_ms = None;
    let mut path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dump" => mode = Mode::Dump,
            "--json" => mode = Mode::Json,
            "--chunk" => {
                let value = args.next().ok_or("--chunk needs a value")?;
                chunk_size = Some(value.parse().map_err(|_| "--chunk needs a number")?);
            }
            "--tick" => {
                let value = args.next().ok_or("--tick needs a value")?;
                tick_ms = Some(value.parse().map_err(|_| "--tick needs a number")?);
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown flag '{other}'"));
            }
            other => {
                if path.replace(other.to_string()).is_some() {
                    return Err("more than one transcript given".to_string());
                }
            }
        }
    }

    Ok(Options {
        mode,
        chunk_size,
        tick_ms,
        path: path.ok_or("no transcript given")?,
    })
}

fn read_transcript(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read(path)?)
    }
}

fn run_tui(mut app: App, tick: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, tick);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('r') => app.restart(),
                    KeyCode::Char(' ') => app.paused = !app.paused,
                    _ => {}
                }
            }
        } else if !app.paused {
            app.feed_next();
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let lines = block_lines(app.stream.blocks());

    let status = if app.paused {
        " paused"
    } else if app.finished() {
        " done"
    } else {
        ""
    };
    let title = format!(
        "replymark — request {}{status}",
        app.stream.generation() + 1
    );

    // Keep the latest output in view while the reply "types" in.
    let viewport = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(viewport) as u16;

    let content = widgets::Paragraph::new(lines)
        .block(
            widgets::Block::default()
                .borders(widgets::Borders::ALL)
                .title(title),
        )
        .wrap(widgets::Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(content, chunks[0]);

    let help = Line::from(vec![
        Span::raw("q: Quit | space: Pause | r: Replay — "),
        Span::styled(
            format!("{}/{} bytes", app.cursor, app.transcript.len()),
            Style::default().fg(DIM_COLOR),
        ),
    ]);
    f.render_widget(widgets::Paragraph::new(vec![help]), chunks[1]);
}

/// Maps the render tree 1:1 onto styled terminal lines.
fn block_lines(blocks: &[Block]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in blocks {
        match block {
            Block::Rule => lines.push(Line::from(Span::styled(
                "─".repeat(40),
                Style::default().fg(DIM_COLOR),
            ))),
            Block::Heading { level, spans } => {
                let color = if *level == 2 {
                    HEADING_H2_COLOR
                } else {
                    HEADING_H3_COLOR
                };
                let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
                lines.push(Line::from(styled_spans(spans, style, style)));
            }
            Block::List { items } => {
                for item in items {
                    let mut spans = vec![Span::styled("• ", Style::default().fg(DIM_COLOR))];
                    spans.extend(styled_spans(item, text_style(), bold_style()));
                    lines.push(Line::from(spans));
                }
            }
            Block::Blockquote { spans } => {
                let mut row = vec![Span::styled("▌ ", Style::default().fg(QUOTE_COLOR))];
                row.extend(styled_spans(
                    spans,
                    Style::default().fg(QUOTE_COLOR),
                    Style::default().fg(QUOTE_COLOR).add_modifier(Modifier::BOLD),
                ));
                lines.push(Line::from(row));
            }
            Block::Table { header, rows } => {
                lines.extend(table_lines(header.as_deref(), rows));
            }
            Block::Spacer => lines.push(Line::default()),
            Block::Paragraph { spans } => {
                lines.push(Line::from(styled_spans(spans, text_style(), bold_style())));
            }
        }
    }

    lines
}

fn text_style() -> Style {
    Style::default().fg(TEXT_COLOR)
}

fn bold_style() -> Style {
    Style::default().fg(BOLD_COLOR).add_modifier(Modifier::BOLD)
}

fn styled_spans(
    spans: &[replymark_engine::Span],
    plain: Style,
    bold: Style,
) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|s| match s {
            replymark_engine::Span::Text(t) => Span::styled(t.clone(), plain),
            replymark_engine::Span::Bold(t) => Span::styled(t.clone(), bold),
        })
        .collect()
}

/// Renders a table with columns padded to their widest cell.
fn table_lines(header: Option<&[String]>, rows: &[Vec<String>]) -> Vec<Line<'static>> {
    let mut widths: Vec<usize> = Vec::new();
    for row in header.into_iter().chain(rows.iter().map(|r| r.as_slice())) {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if i >= widths.len() {
                widths.push(len);
            } else if widths[i] < len {
                widths[i] = len;
            }
        }
    }

    let border = Style::default().fg(DIM_COLOR);
    let mut lines = Vec::new();

    if let Some(cells) = header {
        lines.push(table_row(cells, &widths, bold_style(), border));
        let rule = (widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)).max(1);
        lines.push(Line::from(Span::styled("─".repeat(rule), border)));
    }
    for row in rows {
        lines.push(table_row(row, &widths, text_style(), border));
    }

    lines
}

fn table_row(
    cells: &[String],
    widths: &[usize],
    cell_style: Style,
    border: Style,
) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, &width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        spans.push(Span::styled(format!("{cell:<width$}"), cell_style));
        if i + 1 < widths.len() {
            spans.push(Span::styled(" │ ", border));
        }
    }
    Line::from(spans)
}
