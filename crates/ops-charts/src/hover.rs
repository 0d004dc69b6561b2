//! Pointer hover tracking and tooltip placement.

/// Radius of the invisible hit circle around point markers
pub const HIT_RADIUS: f64 = 14.0;

/// Gap between a hovered marker and its tooltip
pub const TOOLTIP_OFFSET: f64 = 12.0;

const TOOLTIP_LINE_HEIGHT: f64 = 16.0;
const TOOLTIP_PADDING: f64 = 8.0;
const TOOLTIP_CHAR_WIDTH: f64 = 6.5;

/// The single hovered target of a chart, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTarget<T>(Option<T>);

impl<T> Default for ActiveTarget<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T: PartialEq> ActiveTarget<T> {
    /// Pointer entered `target`; replaces any previous target
    pub fn enter(&mut self, target: T) {
        self.0 = Some(target);
    }

    /// Pointer left the chart's hit area
    pub fn leave(&mut self) {
        self.0 = None;
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn is(&self, target: &T) -> bool {
        self.0.as_ref() == Some(target)
    }
}

/// Position and size of a tooltip box in chart coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub lines: Vec<String>,
}

impl TooltipLayout {
    /// Centre the box above `(anchor_x, anchor_y)`, flip it below when it would
    /// leave the top edge, and keep it inside `bounds_width` horizontally
    pub fn anchored(anchor_x: f64, anchor_y: f64, lines: Vec<String>, bounds_width: f64) -> Self {
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = longest as f64 * TOOLTIP_CHAR_WIDTH + TOOLTIP_PADDING * 2.0;
        let height = lines.len() as f64 * TOOLTIP_LINE_HEIGHT + TOOLTIP_PADDING;

        let max_x = (bounds_width - width).max(0.0);
        let x = (anchor_x - width / 2.0).clamp(0.0, max_x);

        let above = anchor_y - TOOLTIP_OFFSET - height;
        let y = if above < 0.0 { anchor_y + TOOLTIP_OFFSET } else { above };

        Self { x, y, width, height, lines }
    }

    /// Baseline y of each text line
    pub fn line_positions(&self) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.lines.iter().enumerate().map(move |(i, line)| {
            let y = self.y + TOOLTIP_PADDING / 2.0 + (i as f64 + 0.75) * TOOLTIP_LINE_HEIGHT;
            (y, line.as_str())
        })
    }

    pub fn text_x(&self) -> f64 {
        self.x + TOOLTIP_PADDING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_active_target() {
        let mut hover = ActiveTarget::default();
        assert_eq!(hover.get(), None);

        hover.enter(2usize);
        hover.enter(5usize);
        assert!(hover.is(&5));
        assert!(!hover.is(&2));

        hover.leave();
        assert_eq!(hover.get(), None);
    }

    #[test]
    fn test_tooltip_sits_above_anchor() {
        let t = TooltipLayout::anchored(200.0, 150.0, vec!["Mon".into(), "Logs: 12".into()], 400.0);
        assert!(t.y + t.height <= 150.0 - TOOLTIP_OFFSET + 1e-9);
        assert!((t.x + t.width / 2.0 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_tooltip_flips_below_near_top() {
        let t = TooltipLayout::anchored(200.0, 10.0, vec!["Value".into()], 400.0);
        assert_eq!(t.y, 10.0 + TOOLTIP_OFFSET);
    }

    #[test]
    fn test_tooltip_clamped_into_bounds() {
        let t = TooltipLayout::anchored(395.0, 150.0, vec!["A long tooltip label".into()], 400.0);
        assert!(t.x + t.width <= 400.0 + 1e-9);
        let t = TooltipLayout::anchored(2.0, 150.0, vec!["A long tooltip label".into()], 400.0);
        assert_eq!(t.x, 0.0);
    }

    #[test]
    fn test_line_positions_stack_downward() {
        let t = TooltipLayout::anchored(100.0, 100.0, vec!["a".into(), "b".into()], 400.0);
        let ys: Vec<f64> = t.line_positions().map(|(y, _)| y).collect();
        assert_eq!(ys.len(), 2);
        assert!(ys[1] > ys[0]);
        assert!(ys[1] < t.y + t.height);
    }
}
