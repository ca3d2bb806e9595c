use std::path::PathBuf;

use notation::{ConversionResult, ConvertError, Converter, Mode, Notation, Step, StepAction};
use serde::Serialize;

/// Run a conversion and capture a replayable visualization of it alongside the result.
pub trait ConvertVizExt {
    type Viz: VizOut;

    fn convert_v(&self, mode: Mode, expr: &str) -> (Result<ConversionResult, ConvertError>, Self::Viz);
}

pub trait VizOut {
    type Config;

    fn label(self, info_header: String, info_txt: String) -> Self;

    fn fuse(self, next: Self, info_header: String, info_txt: String) -> Self;

    fn finish(self, cfg: Self::Config) -> std::io::Result<()>;
}

impl ConvertVizExt for Converter {
    type Viz = Viz;

    fn convert_v(&self, mode: Mode, expr: &str) -> (Result<ConversionResult, ConvertError>, Viz) {
        match self.convert(mode, expr) {
            Ok(result) => {
                let viz = Viz::from_result(&result);
                (Ok(result), viz)
            }
            Err(e) => {
                let viz = Viz::from_error(mode, expr, &e);
                (Err(e), viz)
            }
        }
    }
}

impl VizOut for () {
    type Config = ();

    fn label(self, _info_header: String, _info_txt: String) -> Self {}

    fn fuse(self, _next: Self, _info_header: String, _info_txt: String) -> Self {}

    fn finish(self, _cfg: Self::Config) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "typ", rename_all = "snake_case")]
pub enum VizAction {
    // info text display!
    InfoCard {
        info_header: String,
        info_txt: String,
    },
    // a token was read, nothing moved yet
    Read {
        token: char,
        caption: String,
    },
    // operand appended straight to the output buffer
    Emit {
        operand: char,
        caption: String,
        output: String,
    },
    // `item` is now on top of `stack`
    Push {
        item: String,
        caption: String,
        stack: Vec<String>,
        output: String,
    },
    // `item` left the stack for the output buffer
    Pop {
        item: String,
        caption: String,
        stack: Vec<String>,
        output: String,
    },
    // a parenthesis was dropped without reaching the output
    Discard {
        caption: String,
        stack: Vec<String>,
        output: String,
    },
    // two operand stack entries merged into one
    Combine {
        operator: char,
        left: String,
        right: String,
        combined: String,
        caption: String,
        stack: Vec<String>,
    },
    Reverse {
        reversed: String,
        caption: String,
    },
    Result {
        notation: Notation,
        output: String,
        caption: String,
    },
}

impl VizAction {
    fn from_step(step: &Step) -> Self {
        let caption = step.description.clone();
        let stack = step.stack.clone();
        let output = step.output.clone();

        match &step.action {
            StepAction::Begin { mode, .. } => VizAction::InfoCard {
                info_header: mode.to_string(),
                info_txt: caption,
            },
            StepAction::Outcome { result } => VizAction::InfoCard {
                info_header: "Completed".to_string(),
                info_txt: format!("result: {}", result),
            },
            StepAction::Reverse { reversed } => VizAction::Reverse {
                reversed: reversed.clone(),
                caption,
            },
            StepAction::ReadRightParen => VizAction::Read { token: ')', caption },
            StepAction::ReadOperator { operator } => VizAction::Read {
                token: *operator,
                caption,
            },
            StepAction::EmitOperand { operand } => VizAction::Emit {
                operand: *operand,
                caption,
                output,
            },
            StepAction::PushParen => VizAction::Push {
                item: "(".to_string(),
                caption,
                stack,
                output,
            },
            StepAction::PushOperator { operator } => VizAction::Push {
                item: operator.to_string(),
                caption,
                stack,
                output,
            },
            StepAction::PushOperand { operand, .. } => VizAction::Push {
                item: operand.to_string(),
                caption,
                stack,
                output,
            },
            StepAction::PopOperator { operator } | StepAction::DrainOperator { operator } => {
                VizAction::Pop {
                    item: operator.to_string(),
                    caption,
                    stack,
                    output,
                }
            }
            StepAction::DiscardParen | StepAction::IgnoreParen => VizAction::Discard {
                caption,
                stack,
                output,
            },
            StepAction::Combine {
                operator,
                left,
                right,
                combined,
                ..
            } => VizAction::Combine {
                operator: *operator,
                left: left.clone(),
                right: right.clone(),
                combined: combined.clone(),
                caption,
                stack,
            },
            StepAction::Finish { notation, result } => VizAction::Result {
                notation: *notation,
                output: result.clone(),
                caption,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Viz {
    seed_txt: String,
    mode: Mode,
    actions: Vec<VizAction>,
}

impl Viz {
    /// One action per recorded step. A result recorded without steps still
    /// gets its closing card.
    pub fn from_result(result: &ConversionResult) -> Self {
        let mut actions: Vec<VizAction> = result.steps.iter().map(VizAction::from_step).collect();

        if actions.is_empty() {
            actions.push(VizAction::InfoCard {
                info_header: "Completed".to_string(),
                info_txt: format!("result: {}", result.output),
            });
        }

        Self {
            seed_txt: result.input.clone(),
            mode: result.mode,
            actions,
        }
    }

    pub fn from_error(mode: Mode, input: &str, error: &ConvertError) -> Self {
        Self {
            seed_txt: input.trim().to_string(),
            mode,
            actions: vec![VizAction::InfoCard {
                info_header: "Error during conversion!".to_string(),
                info_txt: format!("error: {}", error),
            }],
        }
    }

    pub fn actions(&self) -> &[VizAction] {
        &self.actions
    }
}

impl VizOut for Viz {
    type Config = PathBuf;

    fn label(mut self, info_header: String, info_txt: String) -> Self {
        let mut actions = vec![VizAction::InfoCard {
            info_header,
            info_txt,
        }];
        actions.extend(self.actions);
        self.actions = actions;

        self
    }

    fn fuse(self, next: Self, info_header: String, info_txt: String) -> Self {
        let mut actions = self.actions;
        actions.push(VizAction::InfoCard {
            info_header,
            info_txt,
        });
        actions.extend(next.actions);

        Self {
            seed_txt: self.seed_txt,
            mode: self.mode,
            actions,
        }
    }

    fn finish(self, cfg: Self::Config) -> std::io::Result<()> {
        let to_write = serialize_html(&self)?;
        tracing::info!(path = %cfg.display(), actions = self.actions.len(), "writing visualization");
        std::fs::write(cfg, to_write)
    }
}

pub fn serialize_json(v: &Viz) -> serde_json::Result<String> {
    serde_json::to_string(v)
}

/// A standalone page that replays the actions of `v`, one every 600ms.
pub fn serialize_html(v: &Viz) -> serde_json::Result<String> {
    // keep user text from closing the script element early
    let data = serialize_json(v)?.replace("</", "<\\/");

    let mut out = String::with_capacity(TEMPLATE_BEFORE.len() + data.len() + TEMPLATE_AFTER.len());
    out.push_str(TEMPLATE_BEFORE);
    out.push_str(&data);
    out.push_str(TEMPLATE_AFTER);

    Ok(out)
}

static TEMPLATE_BEFORE: &str = r###"<!DOCTYPE html>
<meta charset="UTF-8">
<style>

body {
  background-color: lightcyan;
  font-family: verdana, sans-serif;
}

.infocard {
  background-color: white;
  border-style: solid;
  width: 500px;
  padding: 10px;
  border-radius: 10px;
}

.infocard .cardheader {
  font-size: 25px;
  padding-top: 5px;
  padding-bottom: 5px;
  border-bottom: solid;
  border-width: 5px;
}

.infocard .cardbody {
  font-size: 15px;
  padding: 10px;
  font-family: "Lucida Console", "Courier New", monospace;
  background-color: steelblue;
  color: white;
}

#board {
  display: flex;
  gap: 40px;
  margin-top: 20px;
}

#stack {
  display: flex;
  flex-direction: column-reverse;
  min-width: 120px;
  min-height: 200px;
  border: 4px solid black;
  border-top: none;
  padding: 4px;
}

#stack .item {
  background-color: white;
  border: 4px solid steelblue;
  border-radius: 4px;
  margin: 2px;
  padding: 4px 8px;
  font: 16px "Lucida Console", monospace;
}

#output {
  font: 24px "Lucida Console", monospace;
  min-width: 200px;
}

#caption {
  margin-top: 20px;
  font-size: 16px;
}

.flash {
  color: mediumvioletred;
}

</style>

<body>

<div id="titlecard" class="infocard">
  <div class="cardheader">header</div>
  <div class="cardbody">body</div>
</div>

<div id="board">
  <div>
    <div>stack</div>
    <div id="stack"></div>
  </div>
  <div>
    <div>output</div>
    <div id="output"></div>
  </div>
</div>

<div id="caption"></div>

<script>

const data = "###;

static TEMPLATE_AFTER: &str = r###";

const actions = data.actions.slice();

document.querySelector("#titlecard .cardheader").textContent = data.mode;
document.querySelector("#titlecard .cardbody").textContent = data.seed_txt;

function flash(el) {
  el.classList.add("flash");
  setTimeout(function () { el.classList.remove("flash"); }, 400);
}

function showStack(items) {
  const stack = document.querySelector("#stack");
  stack.innerHTML = "";
  items.forEach(function (txt) {
    const item = document.createElement("div");
    item.className = "item";
    item.textContent = txt;
    stack.appendChild(item);
  });
  return stack;
}

function showOutput(txt) {
  const output = document.querySelector("#output");
  if (output.textContent != txt) {
    output.textContent = txt;
    flash(output);
  }
}

function render(next) {
  if (next.typ == "info_card") {
    document.querySelector("#titlecard .cardheader").textContent = next.info_header;
    document.querySelector("#titlecard .cardbody").textContent = next.info_txt;
    flash(document.querySelector("#titlecard"));
    return;
  }

  switch (next.typ) {
    case "emit":
      showOutput(next.output);
      break;
    case "push":
      const top = showStack(next.stack).lastChild;
      if (top) { flash(top); }
      showOutput(next.output);
      break;
    case "pop":
    case "discard":
      showStack(next.stack);
      showOutput(next.output);
      break;
    case "combine":
      const merged = showStack(next.stack).lastChild;
      if (merged) { flash(merged); }
      break;
    case "reverse":
      showStack([]);
      showOutput("");
      document.querySelector("#titlecard .cardbody").textContent = next.reversed;
      break;
    case "result":
      showStack([]);
      showOutput(next.output);
      break;
  }

  document.querySelector("#caption").textContent = next.caption;
}

const intervalId = setInterval(function () {
  const next = actions.shift();
  if (next) {
    render(next);
  } else {
    clearInterval(intervalId);
  }
}, 600);

</script>
</body>
"###;
