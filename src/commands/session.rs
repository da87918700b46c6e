//! # Session 子命令实现
//!
//! 逐行重放编辑脚本。编辑器保存待提交的字段值；每条编辑指令构造一次
//! `EditRequest` 交给 `CrystalState::update`：
//! - 提交成功时编辑器采用耦合后的参数、实际格心与晶带轴
//! - 回滚时编辑器从快照恢复全部字段
//!
//! ## 依赖关系
//! - 使用 `cli/session.rs` 定义的 SessionArgs
//! - 使用 `regex` 解析指令行
//! - 使用 `render/table.rs` 打印反射表

use crate::cli::session::SessionArgs;
use crate::render::table;
use crate::utils::output;

use regex::Regex;
use relp::models::parse_hkl;
use relp::{
    basis_allowed, BasisType, CommittedSnapshot, CrystalState, EditRequest, Field, Hkl,
    LatticeParameters, RelpError, Result, System, UpdateOutcome, ZoneEnumerator,
};
use std::fs;
use std::io::Read;

/// 脚本中的一条指令
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    System(System),
    Basis(BasisType),
    Param(Field, f64),
    Zone(Hkl),
    Show,
}

/// 指令行解析器
struct ScriptParser {
    line_re: Regex,
}

impl ScriptParser {
    fn new() -> Result<Self> {
        let line_re = Regex::new(r"^(?P<cmd>[A-Za-z]+)(?:\s+(?P<rest>.+?))?\s*$")
            .map_err(|e| RelpError::Other(e.to_string()))?;
        Ok(ScriptParser { line_re })
    }

    /// 解析一行；空行与注释返回 None
    fn parse(&self, line: &str) -> Result<Option<Command>> {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }

        let caps = self
            .line_re
            .captures(line)
            .ok_or_else(|| RelpError::InvalidArgument(format!("Cannot parse '{}'", line)))?;
        let cmd = caps["cmd"].to_lowercase();
        let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("");

        let command = match cmd.as_str() {
            "show" => Command::Show,
            "system" => Command::System(rest.parse()?),
            "basis" => Command::Basis(rest.parse()?),
            "zone" => Command::Zone(parse_hkl(rest)?),
            name => {
                let field: Field = name.parse()?;
                if field == Field::None {
                    return Err(RelpError::InvalidArgument(format!(
                        "Unknown command '{}'",
                        name
                    )));
                }
                let value = rest.parse::<f64>().map_err(|_| {
                    RelpError::InvalidArgument(format!("Invalid value '{}' for {}", rest, field))
                })?;
                Command::Param(field, value)
            }
        };

        Ok(Some(command))
    }
}

/// 待提交的编辑器字段
#[derive(Debug, Clone, Copy, PartialEq)]
struct Editor {
    system: System,
    basis: BasisType,
    params: LatticeParameters,
    zone: Hkl,
}

impl Editor {
    fn from_snapshot(snapshot: &CommittedSnapshot) -> Self {
        Editor {
            system: snapshot.system,
            basis: snapshot.basis,
            params: snapshot.params,
            zone: snapshot.zone.hkl(),
        }
    }

    /// 写入一条编辑，返回被编辑的参数
    fn apply(&mut self, command: Command) -> Field {
        match command {
            Command::System(system) => {
                self.system = system;
                if !basis_allowed(system, self.basis) {
                    self.basis = BasisType::Primitive;
                }
                Field::None
            }
            Command::Basis(basis) => {
                self.basis = basis;
                Field::None
            }
            Command::Param(field, value) => {
                self.params.set(field, value);
                field
            }
            Command::Zone(hkl) => {
                self.zone = hkl;
                Field::None
            }
            Command::Show => Field::None,
        }
    }

    fn request(&self, edited: Field) -> EditRequest {
        EditRequest {
            system: self.system,
            basis: self.basis,
            params: self.params,
            zone: self.zone,
            edited,
        }
    }
}

/// 会话：已提交状态 + 编辑器
struct Session {
    state: CrystalState,
    editor: Editor,
    committed: usize,
    rolled_back: usize,
    strict: bool,
    top: usize,
}

impl Session {
    fn new(state: CrystalState, strict: bool, top: usize) -> Self {
        let editor = Editor::from_snapshot(state.snapshot());
        Session {
            state,
            editor,
            committed: 0,
            rolled_back: 0,
            strict,
            top,
        }
    }

    /// 执行一条指令
    fn execute(&mut self, line_no: usize, command: Command) -> Result<()> {
        if command == Command::Show {
            table::print_reflection_table(self.state.crystal(), self.top);
            return Ok(());
        }

        let edited = self.editor.apply(command);
        let request = self.editor.request(edited);

        let outcome = match self.state.update(&request) {
            Ok(outcome) => outcome,
            // 退化晶胞同样不改动已提交状态；非严格模式下按回滚处理
            Err(reason) if !self.strict => UpdateOutcome::RolledBack {
                reason,
                restored: *self.state.snapshot(),
            },
            Err(fatal) => return Err(fatal),
        };

        match outcome {
            UpdateOutcome::Committed {
                params,
                basis,
                zone,
            } => {
                self.committed += 1;
                self.editor.params = params;
                self.editor.basis = basis;
                self.editor.zone = zone.hkl();
                output::print_success(&format!(
                    "line {}: {} ({}) zone {}",
                    line_no,
                    self.state.crystal().label(),
                    params,
                    zone
                ));
                Ok(())
            }
            UpdateOutcome::RolledBack { reason, restored } => {
                self.rolled_back += 1;
                self.editor = Editor::from_snapshot(&restored);
                output::print_rollback(
                    &format!("line {}: {}", line_no, reason),
                    &format!("{} {} {}", restored.system, restored.basis, restored.params),
                );
                if self.strict {
                    Err(reason)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// 执行 session 子命令
pub fn execute(args: SessionArgs) -> Result<()> {
    output::print_header("Lattice Edit Session");

    let script = read_script(&args)?;
    let parser = ScriptParser::new()?;

    let enumerator = ZoneEnumerator::new().with_search_radius(args.search_radius);
    let state = CrystalState::init_with(LatticeParameters::cubic(args.a), enumerator)?;
    output::print_info(&format!(
        "Starting from {} ({})",
        state.crystal().label(),
        state.parameters()
    ));

    let mut session = Session::new(state, args.strict, args.top);
    for (idx, line) in script.lines().enumerate() {
        let line_no = idx + 1;
        let command = parser.parse(line).map_err(|e| {
            RelpError::InvalidArgument(format!("line {}: {}", line_no, e))
        })?;
        if let Some(command) = command {
            session.execute(line_no, command)?;
        }
    }

    output::print_separator();
    output::print_done(&format!(
        "{} edits committed, {} rolled back",
        session.committed, session.rolled_back
    ));
    table::print_reflection_table(session.state.crystal(), session.top);

    Ok(())
}

/// 读取脚本（文件或标准输入）
fn read_script(args: &SessionArgs) -> Result<String> {
    match args.script {
        Some(ref path) => fs::read_to_string(path).map_err(|e| RelpError::FileReadError {
            path: path.display().to_string(),
            source: e,
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| RelpError::FileReadError {
                    path: "<stdin>".to_string(),
                    source: e,
                })?;
            Ok(text)
        }
    }
}
