use colored::Colorize;
use indoc::formatdoc;

const FIRST_COLUMN_MIN_WIDTH: usize = 10;
const MIN_BOX_WIDTH: usize = 20;
const MAX_BOX_WIDTH: usize = 80;

/// Boxed two-column listing; rows keep their insertion order.
pub struct Table {
    title: String,
    rows: Vec<(String, String)>,
}

impl Table {
    pub fn new(title: impl Into<String>, rows: Vec<(String, String)>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    pub fn render(&self) -> String {
        let title = format!(" {} ", self.title);
        let title_width = console::measure_text_width(&title);

        let widest_value = self
            .rows
            .iter()
            .flat_map(|(_, value)| value.lines().map(console::measure_text_width))
            .max()
            .unwrap_or(0)
            .max(title_width);
        let key_width = self
            .rows
            .iter()
            .map(|(key, _)| console::measure_text_width(key))
            .max()
            .unwrap_or(0)
            .max(FIRST_COLUMN_MIN_WIDTH);

        let edge = format!("{} ", box_drawing::double::VERTICAL);
        let separator = format!(" {} ", box_drawing::light::VERTICAL);
        let chrome = console::measure_text_width(&edge) * 2 + console::measure_text_width(&separator);

        let box_width = (chrome + key_width + widest_value).clamp(MIN_BOX_WIDTH, MAX_BOX_WIDTH);
        let value_width = box_width.saturating_sub(chrome + key_width).max(1);

        let padding = box_width.saturating_sub(title_width + 2);
        let top = format!(
            "{}{}{}{}{}",
            box_drawing::double::DOWN_RIGHT.cyan().dimmed(),
            box_drawing::double::HORIZONTAL
                .repeat(padding.div_ceil(2))
                .cyan()
                .dimmed(),
            title.magenta().bold(),
            box_drawing::double::HORIZONTAL
                .repeat(padding / 2)
                .cyan()
                .dimmed(),
            box_drawing::double::DOWN_LEFT.cyan().dimmed(),
        );
        let bottom = format!(
            "{}{}{}",
            box_drawing::double::UP_RIGHT.cyan().dimmed(),
            box_drawing::double::HORIZONTAL
                .repeat(box_width - 2)
                .cyan()
                .dimmed(),
            box_drawing::double::UP_LEFT.cyan().dimmed()
        );

        let rows = self
            .rows
            .iter()
            .map(|(key, value)| render_row(key, value, &edge, &separator, key_width, value_width))
            .collect::<Vec<_>>()
            .join("\n");

        formatdoc! {"
          {}
          {}
          {}",
          top,
          rows,
          bottom
        }
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

fn render_row(
    key: &str,
    value: &str,
    edge: &str,
    separator: &str,
    key_width: usize,
    value_width: usize,
) -> String {
    let mut options = textwrap::Options::new(value_width);
    options.break_words = true;
    let right_edge = edge.chars().rev().collect::<String>();
    let separator = separator.cyan().dimmed().to_string();

    textwrap::wrap(value, options)
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let label = if i == 0 { key } else { "" };
            format!(
                "{}{}{}{}{}",
                edge.cyan().dimmed(),
                console::pad_str(label, key_width, console::Alignment::Left, None).bold(),
                separator,
                console::pad_str(line, value_width, console::Alignment::Left, None),
                right_edge.cyan().dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
