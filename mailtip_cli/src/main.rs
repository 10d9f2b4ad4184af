use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::Context as _;
use clap::Parser;
use mailtip_config::Settings;
use mailtip_core::{
    config::Options,
    context::Direction,
    host::{Host, Mailtip, Widget},
    key_event::{InputEvent, Target},
    layout::{Geometry, PanelWidth, Rect},
    model::{Candidate, PanelState},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// 邮箱补全终端演示：每行输入即输入框的新文本，`:` 开头的是按键/指针命令。
#[derive(Debug, Parser)]
#[command(name = "mailtip", version)]
struct Args {
    /// TOML 设置文件
    #[arg(long)]
    config: Option<PathBuf>,
    /// 域名列表文件（每行一个），覆盖设置文件中的域名
    #[arg(long)]
    domains: Option<PathBuf>,
    /// 直接给出域名，可重复；优先级最高
    #[arg(long = "domain", value_name = "DOMAIN")]
    domain: Vec<String>,
    /// 输入框宽度（用于报告面板位置）
    #[arg(long, default_value_t = 240.0)]
    field_width: f64,
    /// 输入框高度（用于报告面板位置）
    #[arg(long, default_value_t = 32.0)]
    field_height: f64,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let committed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&committed);
    let options = build_options(&args)?.on_select(move |email| {
        if let Ok(mut list) = sink.lock() {
            list.push(email.to_owned());
        }
    });

    let mailtip = Mailtip::configure(options);
    let mut widget = mailtip.bind(TerminalHost::default());
    repl(&mut widget, &args, &committed)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_options(args: &Args) -> anyhow::Result<Options> {
    let mut options = match &args.config {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("无法加载设置 {}", path.display()))?
            .into_options(),
        None => Options::new(),
    };
    if let Some(path) = &args.domains {
        let domains = mailtip_config::load_domains(path)
            .with_context(|| format!("无法加载域名列表 {}", path.display()))?;
        options = options.domains(domains);
    }
    if !args.domain.is_empty() {
        options = options.domains(args.domain.iter().cloned());
    }
    Ok(options)
}

/// REPL 中的一行输入。
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Event(InputEvent),
    Show,
    Quit,
}

fn parse_line(line: &str) -> Result<Command, String> {
    let Some(cmd) = line.strip_prefix(':') else {
        return Ok(Command::Event(InputEvent::TextChanged(line.to_owned())));
    };
    let mut parts = cmd.split_whitespace();
    let name = parts.next().unwrap_or("");
    let index = |arg: Option<&str>| -> Result<usize, String> {
        arg.and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .map(|n| n - 1)
            .ok_or_else(|| format!("`:{name}` 需要一个从 1 开始的序号"))
    };
    let event = match name {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "show" => return Ok(Command::Show),
        "n" | "next" => InputEvent::Navigate(Direction::Next),
        "p" | "prev" => InputEvent::Navigate(Direction::Previous),
        "enter" => InputEvent::Commit,
        "tab" | "esc" => InputEvent::Dismiss,
        "blur" => InputEvent::FocusMoved(Target::Outside),
        "click" => InputEvent::PointerSelect(index(parts.next())?),
        "hover" => InputEvent::PointerEnter(index(parts.next())?),
        _ => return Err(format!("未知命令 `:{name}`")),
    };
    Ok(Command::Event(event))
}

fn repl(
    widget: &mut Widget<TerminalHost>,
    args: &Args,
    committed: &Mutex<Vec<String>>,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let stdin = io::stdin();
    let mut line = String::new();

    writeln!(out, "mailtip demo | 输入文本回车即为输入框内容；:n/:p 移动，:enter 提交，:esc 关闭，:click N，:hover N，:blur，:show，:q 退出")?;
    let placement = widget.placement(&Geometry {
        field: Rect {
            top: 0.0,
            left: 0.0,
            width: args.field_width,
            height: args.field_height,
        },
        container: Rect::default(),
        panel_chrome: 0.0,
    });
    let width = match placement.width {
        PanelWidth::Auto { min_width } => format!("auto (min {min_width})"),
        PanelWidth::Fixed(px) => format!("{px}px"),
    };
    writeln!(
        out,
        "panel: top={} left={} width={} z-index={}",
        placement.top, placement.left, width, placement.z_index
    )?;

    loop {
        line.clear();
        write!(out, "field> ")?;
        out.flush()?;
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\n', '\r']);

        let command = match parse_line(input) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        debug!(?command, "处理输入");

        let before = committed.lock().map(|c| c.len()).unwrap_or(0);
        match command {
            Command::Quit => break,
            Command::Show => {
                for l in describe(&widget.state()) {
                    writeln!(out, "{l}")?;
                }
            }
            Command::Event(ev) => {
                widget.dispatch(ev);
                for l in widget.host_mut().drain() {
                    writeln!(out, "{l}")?;
                }
            }
        }

        if let Ok(list) = committed.lock() {
            for email in list.iter().skip(before) {
                writeln!(out, "commit: {email}")?;
            }
        }
    }

    let list = committed.lock().map(|c| c.clone()).unwrap_or_default();
    if !list.is_empty() {
        writeln!(out, "已提交：{}", list.join(", "))?;
    }
    Ok(())
}

/// `:show` 的输出：文本、可见性与当前高亮候选，随后是候选列表。
fn describe(state: &PanelState) -> Vec<String> {
    let active = state
        .active_candidate()
        .map_or("-", |c| c.text.as_str());
    let mut lines = vec![format!(
        "  text: {:?} visible: {} active: {active}",
        state.text, state.visible
    )];
    for (i, c) in state.candidate_list.iter().enumerate() {
        let marker = if state.active == Some(i) { '>' } else { ' ' };
        lines.push(format!("  {marker}{}. {}", i + 1, c.text));
    }
    lines
}

/// 终端宿主：把面板画成带序号的文本列表。
///
/// `Host` 的回调不返回错误，输出先积攒在内存里，由 REPL 统一写出。
#[derive(Debug, Default)]
struct TerminalHost {
    items: Vec<String>,
    active: Option<usize>,
    hover: Option<usize>,
    visible: bool,
    dirty: bool,
    pending: Vec<String>,
}

impl TerminalHost {
    fn drain(&mut self) -> Vec<String> {
        if self.dirty && self.visible {
            for (i, item) in self.items.iter().enumerate() {
                let marker = if self.active == Some(i) { '>' } else { ' ' };
                let hover = if self.hover == Some(i) { " *" } else { "" };
                self.pending.push(format!("  {marker}{}. {item}{hover}", i + 1));
            }
        }
        self.dirty = false;
        std::mem::take(&mut self.pending)
    }
}

impl Host for TerminalHost {
    fn render(&mut self, candidates: &[Candidate], active: usize) {
        self.items = candidates.iter().map(|c| c.text.clone()).collect();
        self.active = Some(active);
        self.hover = None;
        self.visible = true;
        self.dirty = true;
    }

    fn set_active(&mut self, active: usize) {
        self.active = Some(active);
        self.dirty = true;
    }

    fn set_hover(&mut self, hover: Option<usize>) {
        self.hover = hover;
        self.dirty = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.pending.push("  (面板已隐藏)".to_string());
    }

    fn set_text(&mut self, text: &str) {
        self.pending.push(format!("  field = {text}"));
    }
}
