use crate::errors::user_message;
use crate::models::{ActivitySummary, ChartPoint};
use crate::theme::{Theme, stage_name};
use crate::view::{Model, Phase};
use std::fmt::Write;

pub fn render_page(model: &Model, theme: &Theme, share_url: Option<&str>) -> String {
    let palette = &theme.palette;
    INDEX_HTML
        .replace("{{BG_1}}", palette.bg[0])
        .replace("{{BG_2}}", palette.bg[1])
        .replace("{{BG_3}}", palette.bg[2])
        .replace("{{ACCENT}}", palette.accent)
        .replace("{{THEME_KEY}}", theme.season.key())
        .replace("{{THEME_ICON}}", theme.icon)
        .replace("{{THEME_NAME}}", theme.name)
        .replace("{{PARTICLES}}", &render_particles(theme))
        .replace(
            "{{INPUT}}",
            &escape_html(model.current_handle().unwrap_or(model.input.trim())),
        )
        .replace("{{CONTENT}}", &render_content(model, theme, share_url))
}

/// The swappable part of the page below the form.
pub fn render_content(model: &Model, theme: &Theme, share_url: Option<&str>) -> String {
    match &model.phase {
        Phase::Idle => INTRO_HTML.to_string(),
        Phase::Loading { .. } => {
            r#"<div class="notice loading">Growing your garden...</div>"#.to_string()
        }
        Phase::Failed { error, .. } => format!(
            r#"<div class="notice error" role="alert">{}</div>"#,
            escape_html(user_message(error))
        ),
        Phase::Loaded(summary) => render_garden(summary, theme, share_url),
    }
}

fn render_garden(summary: &ActivitySummary, theme: &Theme, share_url: Option<&str>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<section class="garden" data-stage="{stage}">
  <h1 class="owner">{name}<span>'s garden</span></h1>
  {plant}
  <div class="badge">{stage_name}</div>
  <p class="message">{message}</p>
  <div class="stats">
    <div class="stat"><span class="value">{today}</span><span class="label">today</span></div>
    <div class="stat"><span class="value">{streak}</span><span class="label">day streak</span></div>
    <div class="stat"><span class="value">{total}</span><span class="label">this year</span></div>
  </div>
  <div class="chart-card">
    <div class="label">Last 7 days</div>
    {sparkline}
  </div>
"#,
        stage = summary.stage,
        name = escape_html(&summary.username),
        plant = render_plant(summary.stage, theme),
        stage_name = stage_name(summary.stage),
        message = theme.message(summary.stage),
        today = summary.today,
        streak = summary.streak,
        total = group_thousands(summary.total_last_year),
        sparkline = render_sparkline(&summary.chart(), theme.palette.sparkline),
    );
    if let Some(url) = share_url {
        let _ = writeln!(
            html,
            r#"  <a class="share" href="{}" target="_blank" rel="noopener noreferrer">Share your garden</a>"#,
            escape_html(url)
        );
    }
    html.push_str("</section>");
    html
}

const STEMS: [(&str, u8); 5] = [
    ("M100 238 Q100 220 100 210", 3),
    ("M100 238 Q100 200 100 180", 3),
    ("M100 238 Q98 190 100 150", 4),
    ("M100 238 Q98 180 100 120", 4),
    ("M100 238 Q98 170 100 100", 5),
];

struct Leaf {
    path: &'static str,
    shade: usize,
    begin: f32,
}

/// Leaf tiers unlocked at stages 2, 3 and 4.
const LEAF_TIERS: [&[Leaf]; 3] = [
    &[
        Leaf { path: "M100 200 Q115 190 120 195 Q115 205 100 200", shade: 0, begin: 0.5 },
        Leaf { path: "M100 195 Q85 185 80 190 Q85 200 100 195", shade: 1, begin: 0.7 },
    ],
    &[
        Leaf { path: "M100 170 Q120 155 128 162 Q118 175 100 170", shade: 0, begin: 0.8 },
        Leaf { path: "M100 165 Q80 150 72 158 Q82 170 100 165", shade: 1, begin: 1.0 },
    ],
    &[
        Leaf { path: "M100 140 Q125 118 135 128 Q122 145 100 140", shade: 2, begin: 1.0 },
        Leaf { path: "M100 135 Q75 113 65 123 Q78 140 100 135", shade: 0, begin: 1.2 },
        Leaf { path: "M100 125 Q112 105 105 95 Q95 108 100 125", shade: 1, begin: 1.4 },
    ],
];

// (cx, cy, radius, alt colour, begin)
const FLOWERS: [(u32, u32, f32, bool, f32); 3] = [
    (130, 120, 8.0, false, 1.5),
    (72, 115, 7.0, true, 1.7),
    (105, 90, 9.0, false, 1.9),
];

const SPARKLES: [(u32, u32, f32, f32, f32); 3] = [
    (145, 105, 2.0, 2.0, 2.5),
    (58, 100, 1.5, 2.5, 2.8),
    (115, 78, 1.5, 1.8, 3.0),
];

pub fn render_plant(stage: u8, theme: &Theme) -> String {
    let stage = usize::from(stage.min(5));
    let palette = &theme.palette;
    let mut svg = String::from(
        r##"<svg class="plant" viewBox="0 0 200 300" role="img" aria-label="plant">
  <path d="M60 240 L80 280 L120 280 L140 240 Z" fill="#C4956A" stroke="#A0724E" stroke-width="2" />
  <ellipse cx="100" cy="240" rx="42" ry="8" fill="#D4A574" />
  <ellipse cx="100" cy="242" rx="36" ry="6" fill="#5D4037" />
"##,
    );
    let _ = writeln!(
        svg,
        r#"  <text x="100" y="268" text-anchor="middle" font-size="14">{}</text>"#,
        theme.pot_deco
    );

    if stage == 0 {
        svg.push_str(
            r##"  <ellipse cx="100" cy="236" rx="6" ry="4" fill="#8B6914"><animate attributeName="opacity" values="0.7;1;0.7" dur="3s" repeatCount="indefinite" /></ellipse>
"##,
        );
    } else {
        let (path, width) = STEMS[stage - 1];
        let _ = writeln!(
            svg,
            r#"  <path d="{path}" stroke="{}" stroke-width="{width}" fill="none" stroke-linecap="round"><animate attributeName="stroke-dasharray" from="0 200" to="200 0" dur="1.5s" fill="freeze" /></path>"#,
            palette.stem
        );
    }

    for tier in LEAF_TIERS.iter().take(stage.saturating_sub(1)) {
        for leaf in tier.iter() {
            let _ = writeln!(
                svg,
                r#"  <path d="{}" fill="{}" opacity="0"><animate attributeName="opacity" from="0" to="1" dur="0.8s" begin="{}s" fill="freeze" /></path>"#,
                leaf.path, palette.leaves[leaf.shade], leaf.begin
            );
        }
    }

    if stage == 5 {
        for (cx, cy, r, alt, begin) in FLOWERS {
            let fill = if alt { palette.flower_alt } else { palette.flower };
            let _ = writeln!(
                svg,
                r##"  <circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" opacity="0"><animate attributeName="opacity" from="0" to="1" dur="0.6s" begin="{begin}s" fill="freeze" /></circle>
  <circle cx="{cx}" cy="{cy}" r="{}" fill="#FFC107" opacity="0"><animate attributeName="opacity" from="0" to="1" dur="0.4s" begin="{}s" fill="freeze" /></circle>"##,
                r * 0.4,
                begin + 0.3
            );
        }
        for (cx, cy, r, dur, begin) in SPARKLES {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{cx}" cy="{cy}" r="{r}" fill="{}" opacity="0"><animate attributeName="opacity" values="0;1;0" dur="{dur}s" begin="{begin}s" repeatCount="indefinite" /></circle>"#,
                palette.accent
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

pub fn render_sparkline(points: &[ChartPoint], color: &str) -> String {
    const WIDTH: f64 = 280.0;
    const HEIGHT: f64 = 60.0;

    if points.is_empty() {
        return String::new();
    }

    let max = points.iter().map(|p| p.count).max().unwrap_or(0).max(1) as f64;
    let step = if points.len() > 1 {
        WIDTH / (points.len() - 1) as f64
    } else {
        0.0
    };
    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = i as f64 * step;
            let y = HEIGHT - (p.count as f64 / max) * (HEIGHT - 10.0) - 5.0;
            (x, y)
        })
        .collect();

    let mut svg = format!(
        r#"<svg class="sparkline" viewBox="0 0 {WIDTH} {}">"#,
        HEIGHT + 20.0
    );
    for (point, (x, _)) in points.iter().zip(&coords) {
        let initial = point.weekday.chars().next().unwrap_or(' ');
        let _ = write!(
            svg,
            r##"<text x="{x:.1}" y="{}" text-anchor="middle" fill="#9CA3AF" font-size="10" font-family="monospace">{initial}</text>"##,
            HEIGHT + 16.0
        );
    }
    let line = coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(
        svg,
        r#"<polyline points="{line}" fill="none" stroke="{color}" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round" />"#
    );
    for (point, (x, y)) in points.iter().zip(&coords) {
        let fill = if point.count > 0 { color } else { "#374151" };
        let _ = write!(
            svg,
            r##"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{fill}" stroke="#1F2937" stroke-width="1.5"><title>{}: {}</title></circle>"##,
            point.date, point.count
        );
    }
    svg.push_str("</svg>");
    svg
}

/// Deterministic spread; the animation delays do the rest.
fn render_particles(theme: &Theme) -> String {
    const GOLDEN: f64 = 0.618_033_988_75;
    let mut html = String::new();
    for i in 0..theme.particle_count {
        let t = (i as f64 * GOLDEN).fract();
        let u = ((i as f64 + 0.5) * GOLDEN * GOLDEN).fract();
        let _ = write!(
            html,
            r#"<span style="left:{:.1}%;font-size:{:.0}px;animation-delay:{:.1}s;animation-duration:{:.1}s;--sway:{:.0}px">{}</span>"#,
            t * 100.0,
            10.0 + u * 10.0,
            u * 8.0,
            6.0 + t * 6.0,
            (u - 0.5) * 40.0,
            theme.particle
        );
    }
    html
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

const INTRO_HTML: &str = r#"<div class="intro">
  <h1>commit garden</h1>
  <p>watch your GitHub contributions grow into a plant</p>
</div>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>commit garden</title>
  <style>
    :root {
      --bg-1: {{BG_1}};
      --bg-2: {{BG_2}};
      --bg-3: {{BG_3}};
      --accent: {{ACCENT}};
      --card: rgba(255, 255, 255, 0.04);
      --border: rgba(255, 255, 255, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(to bottom, var(--bg-1), var(--bg-2), var(--bg-3));
      color: #f9fafb;
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 48px 16px;
      overflow-x: hidden;
    }

    .app {
      width: min(384px, 100%);
      position: relative;
      z-index: 1;
    }

    .season {
      position: fixed;
      top: 16px;
      right: 16px;
      z-index: 2;
      padding: 6px 12px;
      border-radius: 999px;
      background: var(--card);
      border: 1px solid var(--border);
      color: var(--accent);
      font-size: 0.75rem;
      backdrop-filter: blur(16px);
    }

    .weather {
      position: fixed;
      inset: 0;
      pointer-events: none;
      overflow: hidden;
    }

    .weather span {
      position: absolute;
      top: -20px;
      animation: weather-fall linear infinite;
    }

    @keyframes weather-fall {
      from {
        transform: translate(0, -20px) rotate(0deg);
        opacity: 0;
      }
      10% {
        opacity: 0.8;
      }
      to {
        transform: translate(var(--sway), 105vh) rotate(360deg);
        opacity: 0;
      }
    }

    .intro {
      text-align: center;
      margin-bottom: 32px;
    }

    .intro h1,
    .owner {
      margin: 0 0 8px;
      font-size: 1.8rem;
      letter-spacing: -0.02em;
      text-align: center;
    }

    .intro p {
      margin: 0;
      color: #9ca3af;
      font-size: 0.9rem;
    }

    .owner span {
      color: #6b7280;
      font-weight: 400;
      font-size: 1.1rem;
    }

    form {
      display: flex;
      gap: 8px;
      justify-content: center;
      margin-bottom: 24px;
    }

    .handle {
      position: relative;
    }

    .handle::before {
      content: "@";
      position: absolute;
      left: 12px;
      top: 50%;
      transform: translateY(-50%);
      color: #6b7280;
      font-size: 0.9rem;
    }

    input {
      width: 192px;
      padding: 8px 12px 8px 28px;
      border-radius: 8px;
      border: 1px solid var(--border);
      background: rgba(255, 255, 255, 0.06);
      color: white;
      font-size: 0.9rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 8px;
      padding: 8px 16px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    .notice {
      text-align: center;
      padding: 80px 0;
      color: #9ca3af;
    }

    .notice.loading {
      animation: pulse 1.6s ease-in-out infinite;
    }

    .notice.error {
      color: #f87171;
      font-size: 0.9rem;
    }

    @keyframes pulse {
      50% {
        opacity: 0.4;
      }
    }

    .plant {
      display: block;
      width: 256px;
      height: 320px;
      margin: 24px auto;
      filter: drop-shadow(0 4px 20px rgba(0, 0, 0, 0.2));
    }

    .badge {
      display: table;
      margin: 0 auto 8px;
      padding: 4px 12px;
      border-radius: 999px;
      background: color-mix(in srgb, var(--accent) 14%, transparent);
      color: var(--accent);
      font-size: 0.85rem;
      font-weight: 500;
    }

    .message {
      text-align: center;
      color: #9ca3af;
      font-size: 0.9rem;
      margin: 0 0 32px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
      margin-bottom: 24px;
    }

    .stat,
    .chart-card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 12px;
      text-align: center;
    }

    .stat span {
      display: block;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 700;
    }

    .stat .label,
    .chart-card .label {
      font-size: 0.75rem;
      color: #6b7280;
      margin-top: 4px;
    }

    .sparkline {
      width: 100%;
      margin-top: 16px;
    }

    .share {
      display: block;
      margin-top: 20px;
      text-align: center;
      color: var(--accent);
      font-size: 0.85rem;
    }
  </style>
</head>
<body data-theme="{{THEME_KEY}}">
  <div class="weather" aria-hidden="true">{{PARTICLES}}</div>
  <div class="season">{{THEME_ICON}} {{THEME_NAME}}</div>

  <main class="app">
    <form id="lookup" method="get" action="/">
      <div class="handle">
        <input id="user" name="user" type="text" value="{{INPUT}}" placeholder="github username" autocomplete="off" />
      </div>
      <input type="hidden" name="theme" value="{{THEME_KEY}}" />
      <button type="submit">Grow</button>
    </form>

    <div id="content">{{CONTENT}}</div>
  </main>

  <script>
    const form = document.getElementById('lookup');
    const input = document.getElementById('user');
    const content = document.getElementById('content');
    const theme = document.body.dataset.theme;

    let generation = 0;
    let inflight = null;

    const lookup = async (handle) => {
      generation += 1;
      const mine = generation;
      if (inflight) {
        inflight.abort();
      }
      inflight = new AbortController();

      content.innerHTML = '<div class="notice loading">Growing your garden...</div>';
      try {
        const res = await fetch(
          `/partial/garden/${encodeURIComponent(handle)}?theme=${theme}`,
          { signal: inflight.signal }
        );
        const html = await res.text();
        if (mine !== generation) {
          return;
        }
        content.innerHTML = html;
        if (res.ok) {
          const url = new URL(window.location.href);
          url.searchParams.set('user', handle);
          window.history.replaceState({}, '', url.toString());
        }
      } catch (err) {
        if (mine !== generation || err.name === 'AbortError') {
          return;
        }
        content.innerHTML = '<div class="notice error" role="alert">Couldn\'t find that user. Check the username?</div>';
      }
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const handle = input.value.trim();
      if (handle) {
        lookup(handle);
      }
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContributionDay;
    use crate::source::LookupError;
    use crate::theme::Season;
    use chrono::NaiveDate;

    fn summary(stage: u8) -> ActivitySummary {
        ActivitySummary {
            username: "octo<cat>".to_string(),
            today: 3,
            streak: 9,
            stage,
            total_last_year: 1234567,
            recent: vec![ContributionDay::new("2026-03-15", 3)],
            as_of: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        }
    }

    fn loaded(stage: u8) -> Model {
        Model {
            input: "octo<cat>".to_string(),
            phase: Phase::Loaded(summary(stage)),
            generation: 1,
        }
    }

    #[test]
    fn idle_page_shows_intro_and_theme() {
        let theme = Season::Winter.theme();
        let html = render_page(&Model::default(), theme, None);
        assert!(html.contains("commit garden"));
        assert!(html.contains(r#"data-theme="winter""#));
        assert!(html.contains("--accent: #93c5fd;"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn loaded_page_escapes_handle_and_shows_stats() {
        let theme = Season::Spring.theme();
        let html = render_page(&loaded(2), theme, Some("https://twitter.com/intent/tweet?text=a&b"));
        assert!(html.contains("octo&lt;cat&gt;"));
        assert!(!html.contains("octo<cat>"));
        assert!(html.contains("Seedling"));
        assert!(html.contains(theme.message(2)));
        assert!(html.contains("1,234,567"));
        assert!(html.contains(r#"href="https://twitter.com/intent/tweet?text=a&amp;b""#));
    }

    #[test]
    fn failed_lookup_shows_single_message() {
        let model = Model {
            input: "ghost".into(),
            phase: Phase::Failed {
                handle: "ghost".into(),
                error: LookupError::Malformed("bad".into()),
            },
            generation: 1,
        };
        let html = render_content(&model, Season::Fall.theme(), None);
        assert!(html.contains("Check the username?"));
        assert!(!html.contains("bad"));
    }

    #[test]
    fn plant_grows_with_stage() {
        let theme = Season::Summer.theme();
        let seed = render_plant(0, theme);
        let bloom = render_plant(5, theme);
        assert!(seed.contains("#8B6914"));
        assert!(!seed.contains("stroke-linecap"));
        assert!(bloom.contains("M100 238 Q98 170 100 100"));
        assert!(bloom.contains(theme.palette.flower_alt));
        assert_eq!(render_plant(3, theme).matches("dur=\"0.8s\"").count(), 4);
        assert_eq!(bloom.matches("dur=\"0.8s\"").count(), 7);
    }

    #[test]
    fn sparkline_has_one_dot_per_day() {
        let html = render_content(&loaded(1), Season::Spring.theme(), None);
        assert_eq!(html.matches("<circle").count(), 7);
        assert!(render_sparkline(&[], "#fff").is_empty());
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
