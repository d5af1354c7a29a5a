use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

pub mod error;
pub mod plot;

pub use error::PlotError;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const DEFAULT_CSVIN: &str = "recovery_times.csv";
pub const DEFAULT_PNGOUT: &str = "recovery_graph.png";

pub const COL_INSTANCES: &str = "num_instances";
pub const COL_RECOVERY: &str = "recovery_time_sec";

pub const TITLE: &str = "Number of Instances vs. Time Taken for Recovery";
pub const X_DESC: &str = "Number of Instances";
pub const Y_DESC: &str = "Recovery Time (Seconds)";

/// width and height of the png, in pixels
pub const PNG_SIZE: (u32, u32) = (1200, 800);

type Result<T> = std::result::Result<T, PlotError>;

/// Reads the csv at `csvin` and plots it to the png at `pngout`,
/// overwriting any previous png.
/// Nothing is written when the csv cannot be loaded or the chart cannot be drawn.
pub fn run(csvin: &Path, pngout: &Path) -> Result<()> {
    info!("read data from {} and plot to {}", csvin.display(), pngout.display());
    let rt = RecoveryTimes::from_csv(csvin)?;
    rt.plot_png(pngout)
}

/// The recovery time series, one entry per csv row, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryTimes {
    pub instances: Vec<f64>,
    pub recovery: Vec<f64>,
}

impl RecoveryTimes {
    pub fn new(capacity: usize) -> RecoveryTimes {
        RecoveryTimes {
            instances: Vec::with_capacity(capacity),
            recovery: Vec::with_capacity(capacity),
        }
    }

    /// Init from the csv at the given path, see `from_reader`
    pub fn from_csv(fin: &Path) -> Result<RecoveryTimes> {
        let file = File::open(fin).map_err(|source| PlotError::Read {
            path: fin.to_path_buf(),
            source,
        })?;
        let rt = RecoveryTimes::from_reader(BufReader::new(file))?;
        debug!("loaded {} rows from {}", rt.len(), fin.display());
        Ok(rt)
    }

    /// Init from csv text with a header line.
    /// The two columns are looked up by name, other columns are ignored.
    /// Fields may be double-quoted, commas inside quotes do not split them.
    /// Blank lines are skipped.
    /// Fails on the first row with a missing or non-numeric value,
    /// and when there are no data rows at all.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<RecoveryTimes> {
        let mut lines = reader.lines().enumerate();

        let header = loop {
            match lines.next() {
                Some((_, l)) => {
                    let l = l?;
                    if !l.trim().is_empty() {
                        break l;
                    }
                }
                None => return Err(PlotError::EmptyHeader),
            }
        };
        let columns = split_fields(header.trim_start_matches('\u{feff}'));
        let col_index = |name: &'static str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or(PlotError::MissingColumn { column: name })
        };
        let ix = col_index(COL_INSTANCES)?;
        let iy = col_index(COL_RECOVERY)?;

        let mut rt = RecoveryTimes::new(64);
        for (i, l) in lines {
            let l = l?;
            if l.trim().is_empty() {
                continue;
            }
            let line = i + 1;
            let fields = split_fields(&l);
            let value = |idx: usize, column: &'static str| {
                let raw = fields.get(idx).map(String::as_str).unwrap_or_default();
                parse_value(raw).ok_or_else(|| PlotError::InvalidValue {
                    line,
                    column,
                    value: raw.to_string(),
                })
            };
            let x = value(ix, COL_INSTANCES)?;
            let y = value(iy, COL_RECOVERY)?;
            rt.instances.push(x);
            rt.recovery.push(y);
        }

        if rt.is_empty() {
            return Err(PlotError::EmptyDataset);
        }
        Ok(rt)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// (num_instances, recovery_time_sec) in row order, as drawn on the chart
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.instances
            .iter()
            .zip(self.recovery.iter())
            .map(|(&x, &y)| (x, y))
    }

    /// plots the series to a png, creating or overwriting the file
    pub fn plot_png(&self, fout: &Path) -> Result<()> {
        write_png(fout, |root| self.plot_on(root))?;
        info!("wrote {} points to {}", self.len(), fout.display());
        Ok(())
    }

    /// Draws line and circle markers with title, axis descriptions and grid
    /// on any drawing area; the caller presents it.
    pub fn plot_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (xmin, xmax) = min_and_max(&self.instances[..]).ok_or(PlotError::EmptyDataset)?;
        let (ymin, ymax) = min_and_max(&self.recovery[..]).ok_or(PlotError::EmptyDataset)?;
        let (xmin, xmax) = axis_range(xmin, xmax);
        let (ymin, ymax) = axis_range(ymin, ymax);
        debug!(xmin, xmax, ymin, ymax, "axis ranges");

        root.fill(&WHITE).map_err(drawing_err)?;
        let mut chart = ChartBuilder::on(root)
            .caption(TITLE, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)
            .map_err(drawing_err)?;
        chart
            .configure_mesh()
            .light_line_style(&RGBColor(230, 230, 230))
            .bold_line_style(RGBColor(180, 180, 180).stroke_width(1))
            .label_style(("sans-serif", 24))
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .x_label_formatter(&|x: &f64| format_tick(*x))
            .y_label_formatter(&|y: &f64| format_tick(*y))
            .draw()
            .map_err(drawing_err)?;

        let color = RGBColor(31, 119, 180);
        chart
            .draw_series(LineSeries::new(self.points(), color.stroke_width(2)))
            .map_err(drawing_err)?;
        chart
            .draw_series(self.points().map(|p| Circle::new(p, 6, color.filled())))
            .map_err(drawing_err)?;
        Ok(())
    }
}

impl std::fmt::Display for RecoveryTimes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{},{}", COL_INSTANCES, COL_RECOVERY)?;
        for (x, y) in self.instances.iter().zip(self.recovery.iter()) {
            writeln!(f, "{},{}", x, y)?
        }
        Ok(())
    }
}

/// Draws into an in-memory bitmap and encodes it to `fout` only when `draw` succeeds,
/// so a failed drawing leaves any previous file as it was.
pub fn write_png<F>(fout: &Path, draw: F) -> Result<()>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
{
    let (w, h) = PNG_SIZE;
    let mut buf = vec![0u8; (w * h * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, PNG_SIZE).into_drawing_area();
        draw(&root)?;
        root.present().map_err(drawing_err)?;
    }
    image::save_buffer_with_format(
        fout,
        &buf,
        w,
        h,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|e| PlotError::Write {
        path: fout.to_path_buf(),
        message: e.to_string(),
    })
}

fn drawing_err<E: std::error::Error>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Splits one csv line; fields are trimmed, surrounding double quotes removed
/// and "" inside quotes read as a single quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

/// any finite number
fn parse_value(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0. {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

/// None for an empty slice
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// pads the data range by 5% on both sides;
/// a zero span is widened to at least +-1 around the value
pub fn axis_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let margin = if span > 0. {
        span / 20.
    } else {
        (min.abs() / 20.).max(1.)
    };
    (min - margin, max + margin)
}
