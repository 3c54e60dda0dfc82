//! Fixed-grid terminal charts.
//!
//! Output is deterministic for a given input and size, which keeps it usable
//! in golden tests. Points are drawn with each series' marker, joined by `.`.

/// A series of yearly values drawn as a line
#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub label: &'a str,
    pub marker: char,
    pub points: Vec<(i32, f64)>,
}

/// Render one or more yearly series on a shared grid.
pub fn render_lines(title: &str, lines: &[Line<'_>], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max)) = year_range(lines) else {
        return format!("{title}: no data\n");
    };
    let (y_min, y_max) = value_range(lines).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Connectors first so markers overlay them.
    for line in lines {
        let cells: Vec<_> = line
            .points
            .iter()
            .map(|&(year, value)| {
                (
                    map_x(year, x_min, x_max, width),
                    map_y(value, y_min, y_max, height),
                )
            })
            .collect();
        for pair in cells.windows(2) {
            draw_line(&mut grid, pair[0], pair[1], '.');
        }
    }
    for line in lines {
        for &(year, value) in &line.points {
            let x = map_x(year, x_min, x_max, width);
            let y = map_y(value, y_min, y_max, height);
            grid[y][x] = line.marker;
        }
    }

    let mut out = format!("{title}: {x_min}-{x_max} | y=[{y_min:.2}, {y_max:.2}]\n");
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    let legend: Vec<_> = lines
        .iter()
        .map(|l| format!("{} {}", l.marker, l.label))
        .collect();
    out.push_str(&format!("  {}\n", legend.join("   ")));
    out
}

/// Render one horizontal bar per year, scaled to the largest magnitude.
///
/// Positive values are drawn with `#`, negative values with `-`.
pub fn render_bars(title: &str, bars: &[(i32, f64)], width: usize, unit: &str) -> String {
    let width = width.max(10);
    let max_abs = bars.iter().map(|(_, v)| v.abs()).fold(0.0, f64::max);

    let mut out = format!("{title}\n");
    for &(year, value) in bars {
        let len = if max_abs > 0.0 {
            (value.abs() / max_abs * width as f64).round() as usize
        } else {
            0
        };
        let ch = if value < 0.0 { "-" } else { "#" };
        let bar = ch.repeat(len);
        out.push_str(&format!("{year} |{bar:<width$} {value:+.2}{unit}\n"));
    }
    out
}

fn year_range(lines: &[Line<'_>]) -> Option<(i32, i32)> {
    let years = lines.iter().flat_map(|l| l.points.iter().map(|&(y, _)| y));
    let min = years.clone().min()?;
    let max = years.max()?;
    Some((min, max))
}

fn value_range(lines: &[Line<'_>]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, value) in lines.iter().flat_map(|l| l.points.iter()) {
        if value.is_finite() {
            min_y = min_y.min(value);
            max_y = max_y.max(value);
        }
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        None
    } else if max_y > min_y {
        Some((min_y, max_y))
    } else {
        Some((min_y - 1.0, max_y + 1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(year: i32, x_min: i32, x_max: i32, width: usize) -> usize {
    if x_max <= x_min {
        return 0;
    }
    let u = f64::from(year - x_min) / f64::from(x_max - x_min);
    (u.clamp(0.0, 1.0) * (width as f64 - 1.0)).round() as usize
}

fn map_y(value: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((value - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // top row is the maximum
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham), leaves occupied cells alone.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if let Some(cell) = grid
            .get_mut(y0 as usize)
            .and_then(|row| row.get_mut(x0 as usize))
        {
            if *cell == ' ' {
                *cell = ch;
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_golden_snapshot_small() {
        let lines = vec![Line {
            label: "index",
            marker: 'o',
            points: vec![(2020, 1.0), (2022, 3.0)],
        }];

        let txt = render_lines("Test", &lines, 10, 5);
        let expected = concat!(
            "Test: 2020-2022 | y=[0.90, 3.10]\n",
            "        .o\n",
            "      ..\n",
            "    ..\n",
            "  ..\n",
            "o.\n",
            "  o index\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn bars_golden_snapshot() {
        let txt = render_bars("Cumulative", &[(2020, 0.0), (2021, 5.0), (2022, -2.5)], 10, "%");
        let expected = concat!(
            "Cumulative\n",
            "2020 |           +0.00%\n",
            "2021 |########## +5.00%\n",
            "2022 |-----      -2.50%\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn markers_overlay_connectors() {
        let lines = vec![
            Line {
                label: "a",
                marker: 'a',
                points: vec![(2020, 1.0), (2021, 2.0), (2022, 3.0)],
            },
            Line {
                label: "b",
                marker: 'b',
                points: vec![(2020, 3.0), (2021, 2.0), (2022, 1.0)],
            },
        ];

        let txt = render_lines("Cross", &lines, 11, 5);
        // both series meet in the middle row, the later one wins the cell
        let middle = txt.lines().nth(3).unwrap();
        assert!(middle.contains('b') && !middle.contains('a'));
        assert!(txt.ends_with("  a a   b b\n"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(render_lines("Empty", &[], 10, 5), "Empty: no data\n");
    }

    #[test]
    fn single_year_renders() {
        let lines = vec![Line {
            label: "x",
            marker: 'x',
            points: vec![(2020, 1.0)],
        }];
        let txt = render_lines("One", &lines, 10, 5);
        assert!(txt.contains('x'));
    }
}
