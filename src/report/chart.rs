//! Horizontal bar charts of top-ranked documents.
//!
//! One bar per ranked document, the best one on top, bar length equal to
//! its BM25 score and labelled with the (truncated) article title.
//!
//! Labels need a TrueType font. The font comes from
//! [`ChartConfig::font_path`] or, when unset, from the first readable
//! common system font; it is registered with plotters once per process.
//! Without a usable font only the bars are drawn.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, info, warn};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use crate::config::ChartConfig;
use crate::document::corpus::Corpus;
use crate::error::{RankError, Result};
use crate::scoring::ranking::{QueryVariant, RankedDocument};

/// Bar fill, "skyblue".
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Width reserved for the title labels left of the bars.
const Y_LABEL_AREA: u32 = 260;
const X_TICKS: usize = 6;

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq)]
struct Bar {
    label: String,
    score: f32,
}

/// Shorten a title to `max_chars` characters, appending "..." when cut.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let mut truncated: String = title.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    } else {
        title.to_string()
    }
}

/// Where the chart of a query variant is written.
pub fn plot_path<P: AsRef<Path>>(plots_directory: P, variant: QueryVariant) -> PathBuf {
    plots_directory
        .as_ref()
        .join(format!("top_ranked_results_{}.png", variant.slug()))
}

/// Render the top-k list of one query variant as a PNG.
///
/// The plots directory is created if needed and an existing chart is
/// replaced. Returns the path of the written file.
pub fn render_top_results<P: AsRef<Path>>(
    corpus: &Corpus,
    results: &[RankedDocument],
    variant: QueryVariant,
    plots_directory: P,
    config: &ChartConfig,
) -> Result<PathBuf> {
    let plots_directory = plots_directory.as_ref();
    fs::create_dir_all(plots_directory)?;
    let path = plot_path(plots_directory, variant);

    let bars: Vec<Bar> = results
        .iter()
        .map(|ranked| {
            let title = corpus.get(ranked.doc_id).map_or("", |doc| doc.title());
            Bar {
                label: truncate_title(title, config.title_truncate),
                score: ranked.score,
            }
        })
        .collect();

    let title = format!("Top Ranked Documents ({})", variant.label());
    draw_bar_chart(&path, &title, &bars, config)?;
    info!("Rendered {} bars to {}", bars.len(), path.display());

    Ok(path)
}

fn draw_bar_chart(path: &Path, title: &str, bars: &[Bar], config: &ChartConfig) -> Result<()> {
    let with_text = ensure_font(config);
    if !with_text {
        warn!(
            "No usable font found; rendering {} without labels (set chart.font_path)",
            path.display()
        );
    }

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let max_score = bars.iter().map(|bar| bar.score).fold(0.0_f32, f32::max);
    let x_max = if max_score > 0.0 { max_score } else { 1.0 };
    let rows = bars.len().max(1) as i32;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if with_text {
        builder
            .caption(title, (FONT_FAMILY, 24))
            .x_label_area_size(50)
            .y_label_area_size(Y_LABEL_AREA.min(config.width / 3));
    }
    let mut chart = builder
        .build_cartesian_2d(0f32..x_max, (0..rows).into_segmented())
        .map_err(chart_error)?;

    // Row 0 is the bottom row, so rank 0 takes the last one.
    let row_of = |rank: usize| rows - 1 - rank as i32;
    let bar_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(row) | SegmentValue::Exact(row) => usize::try_from(rows - 1 - row)
            .ok()
            .and_then(|rank| bars.get(rank))
            .map_or_else(String::new, |bar| bar.label.clone()),
        SegmentValue::Last => String::new(),
    };
    let score_label = |score: &f32| format!("{score:.2}");

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_y_mesh();
        if with_text {
            mesh.x_desc("BM25 Score")
                .y_desc("Articles")
                .x_labels(X_TICKS)
                .y_labels(bars.len())
                .x_label_formatter(&score_label)
                .y_label_formatter(&bar_label)
                .label_style((FONT_FAMILY, 14))
                .axis_desc_style((FONT_FAMILY, 16));
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw().map_err(chart_error)?;
    }

    chart
        .draw_series(
            Histogram::horizontal(&chart)
                .style(BAR_COLOR.filled())
                .margin(6)
                .data(
                    bars.iter()
                        .enumerate()
                        .map(|(rank, bar)| (row_of(rank), bar.score.max(0.0))),
                ),
        )
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    debug!("Chart written to {}", path.display());
    Ok(())
}

fn chart_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RankError {
    RankError::chart(e.to_string())
}

/// Register a font for labels once per process. Returns whether one is available.
fn ensure_font(config: &ChartConfig) -> bool {
    *FONT_READY.get_or_init(|| {
        let configured = config.font_path.iter().map(PathBuf::as_path);
        let system = SYSTEM_FONTS.iter().map(Path::new);

        configured.chain(system).any(|candidate| {
            let Ok(bytes) = fs::read(candidate) else {
                return false;
            };
            // plotters keeps registered fonts for the life of the process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                Ok(()) => {
                    debug!("Using font {}", candidate.display());
                    true
                }
                Err(_) => {
                    warn!("{} is not a usable font", candidate.display());
                    false
                }
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::document::document::Document;
    use crate::scoring::ranking::ScoreSet;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn small_config() -> ChartConfig {
        ChartConfig {
            width: 400,
            height: 300,
            ..ChartConfig::default()
        }
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("Short title", 30), "Short title");

        let exact = "a".repeat(30);
        assert_eq!(truncate_title(&exact, 30), exact);

        let long = "Markets rallied on Monday after the central bank";
        assert_eq!(
            truncate_title(long, 30),
            "Markets rallied on Monday afte..."
        );

        assert_eq!(truncate_title("Überraschung in München", 5), "Überr...");
    }

    #[test]
    fn test_plot_path() {
        assert_eq!(
            plot_path("plots", QueryVariant::Expanded),
            PathBuf::from("plots/top_ranked_results_expanded_query.png")
        );
        assert_eq!(
            plot_path("plots", QueryVariant::Simple),
            PathBuf::from("plots/top_ranked_results_simple_query.png")
        );
    }

    #[test]
    fn test_render_top_results() {
        let dir = TempDir::new().unwrap();
        let plots = dir.path().join("plots");
        let corpus = Corpus::new(vec![
            Document::new("Cats are taking over the internet once again", "cats"),
            Document::new("Dogs", "dogs"),
            Document::new("Birds", "birds"),
        ]);
        let top = ScoreSet::new(QueryVariant::Simple, vec![1.2, 0.0, 0.4]).top_k(10);

        let path =
            render_top_results(&corpus, &top, QueryVariant::Simple, &plots, &small_config()).unwrap();

        assert_eq!(path, plots.join("top_ranked_results_simple_query.png"));
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_many_long_titles() {
        let dir = TempDir::new().unwrap();
        let corpus: Corpus = (0..10)
            .map(|i| Document::new(format!("Article number {i} with a rather long headline"), "x"))
            .collect();
        let scores: Vec<f32> = (0..10).map(|i| i as f32 * 0.3).collect();
        let top = ScoreSet::new(QueryVariant::Expanded, scores).top_k(10);

        let path = render_top_results(
            &corpus,
            &top,
            QueryVariant::Expanded,
            dir.path(),
            &ChartConfig::default(),
        )
        .unwrap();

        assert!(fs::read(&path).unwrap().starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_empty_results() {
        let dir = TempDir::new().unwrap();

        let path = render_top_results(
            &Corpus::default(),
            &[],
            QueryVariant::Expanded,
            dir.path(),
            &small_config(),
        )
        .unwrap();

        assert!(path.ends_with("top_ranked_results_expanded_query.png"));
        assert!(fs::read(&path).unwrap().starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_replaces_existing_chart() {
        let dir = TempDir::new().unwrap();
        let existing = plot_path(dir.path(), QueryVariant::Simple);
        fs::write(&existing, b"stale").unwrap();

        let corpus = Corpus::new(vec![Document::new("A", "a")]);
        let top = ScoreSet::new(QueryVariant::Simple, vec![2.0]).top_k(10);
        render_top_results(&corpus, &top, QueryVariant::Simple, dir.path(), &small_config())
            .unwrap();

        assert!(fs::read(&existing).unwrap().starts_with(PNG_SIGNATURE));
    }
}
