use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::drivers::error::ScopeError;
use crate::drivers::pipeline::ScopeView;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    /// Indexed by channel number, so a channel keeps its colour when others are hidden.
    pub palette: Vec<RGBColor>,
    /// Caption, axis labels and legend. These need a system font.
    pub annotate: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            palette: vec![RED, GREEN, BLUE, CYAN, MAGENTA, YELLOW, WHITE],
            annotate: true,
        }
    }
}
/// Renders the step series of `view` to an in-memory PNG.
pub fn render_view_png(view: &ScopeView, style: PlotStyle) -> Result<Vec<u8>, ScopeError> {
    let x_bounds = view
        .channels
        .iter()
        .flat_map(|c| c.series.xs.iter().copied())
        .filter(|x| x.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        });
    let y_bounds = view
        .channels
        .iter()
        .filter_map(|c| c.series.y_bounds())
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
    let (Some((x_min, x_max)), Some((y_min, y_max))) = (x_bounds, y_bounds) else {
        return Err(ScopeError::Plot("view has no samples to draw".into()));
    };
    let (y_min, y_max) = (f64::from(y_min), f64::from(y_max));
    let pad = ((y_max - y_min) * 0.05).max(1.0);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.annotate {
            builder
                .caption("Telemetry", ("sans-serif", 20).into_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 55)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart =
            builder.build_cartesian_2d(x_min..x_max, (y_min - pad)..(y_max + pad))?;
        if style.annotate {
            chart
                .configure_mesh()
                .x_desc("t (s)")
                .light_line_style(&WHITE.mix(0.1))
                .draw()?;
        }
        for channel in &view.channels {
            if channel.series.is_empty() {
                continue;
            }
            let color = style.palette.get(channel.channel).copied().unwrap_or(WHITE);
            let points = channel
                .series
                .stair_points()
                .into_iter()
                .map(|[x, y]| (x, y));
            let drawn = chart.draw_series(LineSeries::new(points, &color))?;
            if style.annotate {
                drawn
                    .label(format!("Ch{}", channel.channel))
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            }
        }
        if style.annotate {
            chart
                .configure_series_labels()
                .border_style(&WHITE.mix(0.2))
                .background_style(&style.background)
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ScopeError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ScopeError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
