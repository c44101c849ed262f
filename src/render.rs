//! Output adapters for a [`MonthLayout`]: an SVG ring and a plain-text listing.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::{
    BAND_STEP, DAY_CIRCLE_RADIUS, MonthDayRecord, MonthLayout, POINTER_TIP_RADIUS,
    SELECTED_OUTLINE_RADIUS,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Vertical nudge that centres the day number inside its circle.
const DAY_LABEL_BASELINE: f64 = 4.0;

/// Renders `layout` as a standalone SVG document.
pub fn render_svg(layout: &MonthLayout) -> String {
    SvgDocument(layout).to_string()
}

/// Renders `layout` as the textual listing (heading plus one line per day).
pub fn render_text(layout: &MonthLayout) -> String {
    TextListing(layout).to_string()
}

/// Escapes the characters that are special in XML text and attribute values.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// [`Display`] adapter writing the SVG ring.
pub struct SvgDocument<'a>(pub &'a MonthLayout);

impl SvgDocument<'_> {
    fn write_bands(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let g = &self.0.geometry;
        for band in &g.bands {
            writeln!(
                f,
                r#"  <circle cx="{c:.2}" cy="{c:.2}" r="{r:.2}" class="cycle-band band-{p}"/>"#,
                c = g.center,
                r = band.radius + BAND_STEP + DAY_CIRCLE_RADIUS,
                p = band.period,
            )?;
        }
        Ok(())
    }

    fn write_sub_labels(&self, f: &mut Formatter<'_>, record: &MonthDayRecord) -> fmt::Result {
        let g = &self.0.geometry;
        for label in record.labels.iter() {
            let Some(band) = g.band(label.period) else {
                continue;
            };
            let at = g.point(band.radius, record.angle);
            writeln!(
                f,
                r#"  <text x="{:.2}" y="{:.2}" class="sub-label band-{}">{}</text>"#,
                at.x,
                at.y,
                label.period,
                escape_xml(&label.label),
            )?;
        }
        Ok(())
    }

    fn write_day(&self, f: &mut Formatter<'_>, record: &MonthDayRecord) -> fmt::Result {
        let g = &self.0.geometry;
        let at = g.point(g.date_radius, record.angle);
        writeln!(
            f,
            r#"  <g class="calendar-day" transform="translate({:.2}, {:.2})" data-day="{}" data-date="{}" role="button" aria-pressed="{}">"#,
            at.x, at.y, record.day, record.date, record.is_selected,
        )?;
        writeln!(
            f,
            "    <title>{} {}</title>",
            record.date,
            escape_xml(&record.labels.join(", ")),
        )?;
        let (circle_class, text_class) = if record.is_today {
            ("today-circle", "day-label today-text")
        } else {
            ("day-circle", "day-label")
        };
        writeln!(
            f,
            r#"    <circle cx="0" cy="0" r="{DAY_CIRCLE_RADIUS}" class="{circle_class}"/>"#
        )?;
        writeln!(
            f,
            r#"    <text x="0" y="{DAY_LABEL_BASELINE}" class="{text_class}">{}</text>"#,
            record.day
        )?;
        if record.is_selected {
            writeln!(
                f,
                r#"    <circle cx="0" cy="0" r="{SELECTED_OUTLINE_RADIUS}" class="selected-outline"/>"#
            )?;
        }
        writeln!(f, "  </g>")
    }

    fn write_pointer(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"  <g class="pointer-group">"#)?;
        if let Some(p) = &self.0.pointer {
            writeln!(
                f,
                r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" class="pointer"/>"#,
                p.start.x, p.start.y, p.end.x, p.end.y,
            )?;
            writeln!(
                f,
                r#"    <circle cx="{:.2}" cy="{:.2}" r="{POINTER_TIP_RADIUS}" class="pointer-tip"/>"#,
                p.tip.x, p.tip.y,
            )?;
        }
        writeln!(f, "  </g>")
    }
}

impl Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let layout = self.0;
        let size = layout.geometry.size;
        writeln!(
            f,
            r#"<svg xmlns="{SVG_NS}" viewBox="0 0 {size} {size}" role="img" aria-label="{}">"#,
            escape_xml(&layout.title()),
        )?;
        writeln!(f, "  <title>{}</title>", escape_xml(&layout.title()))?;
        self.write_bands(f)?;
        for record in &layout.days {
            self.write_sub_labels(f, record)?;
            self.write_day(f, record)?;
        }
        self.write_pointer(f)?;
        writeln!(f, "</svg>")
    }
}

/// [`Display`] adapter writing the textual listing.
pub struct TextListing<'a>(pub &'a MonthLayout);

impl Display for TextListing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0.list_heading())?;
        for entry in self.0.fallback_list() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CycleConfig, CycleDefinition, layout_month,
        test_utils::{date, year_month},
    };

    fn svg_for(today: (u16, u8, u8), shown: (u16, u8)) -> String {
        let layout = layout_month(
            year_month(shown.0, shown.1),
            &CycleConfig::defaults(),
            &date(today.0, today.1, today.2),
            None,
        );
        render_svg(&layout)
    }

    #[test]
    fn test_escape_xml() {
        assert!(matches!(escape_xml("陰陽"), Cow::Borrowed("陰陽")));
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_svg_structure() {
        let svg = svg_for((2024, 2, 10), (2024, 2));
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="calendar-day""#).count(), 29);
        assert_eq!(svg.matches(r#"class="selected-outline""#).count(), 1);
        assert_eq!(svg.matches(r#"class="today-circle""#).count(), 1);
        assert_eq!(svg.matches(r#"class="cycle-band "#).count(), 4);
        assert_eq!(svg.matches(r#"class="sub-label "#).count(), 29 * 4);
        assert_eq!(svg.matches(r#"class="pointer""#).count(), 1);
        assert!(svg.contains(r#"data-date="2024-02-10""#));
        assert!(svg.contains("2024年 02月の環状月暦"));
    }

    #[test]
    fn test_svg_without_today_has_no_pointer() {
        let svg = svg_for((2024, 2, 10), (2024, 3));
        assert_eq!(svg.matches(r#"class="pointer""#).count(), 0);
        assert_eq!(svg.matches(r#"class="today-circle""#).count(), 0);
        assert_eq!(svg.matches(r#"aria-pressed="true""#).count(), 1);
        assert!(svg.contains(r#"data-day="1" data-date="2024-03-01" role="button" aria-pressed="true""#));
    }

    #[test]
    fn test_svg_escapes_labels() {
        let config = CycleConfig::from_definitions([CycleDefinition::new(2, ["<b>", "&"]).unwrap()]);
        let layout = layout_month(year_month(1984, 1), &config, &date(1984, 1, 1), None);
        let svg = render_svg(&layout);
        assert!(svg.contains("&lt;b&gt;"));
        assert!(svg.contains("&amp;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn test_text_listing() {
        let layout = layout_month(
            year_month(1984, 1),
            &CycleConfig::defaults(),
            &date(2000, 1, 1),
            None,
        );
        let text = render_text(&layout);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert_eq!(lines[0], "1984年01月 日別サイクル");
        assert_eq!(lines[1], "01日: 陰 / 石 / 風 / 日");
        assert_eq!(lines[31], "31日: 陰 / 石 / 風 / 火");
    }
}
