//! User-facing strings in Japanese and English
//!
//! Components take a `&dyn Translate` so they never depend on the concrete
//! string table.

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Ja,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ja, Language::En];

    /// Code stored in `settings.txt`
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ja" => Some(Language::Ja),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Name shown in the language selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Ja => "日本語",
            Language::En => "English",
        }
    }
}

/// Message keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    WindowTitle,
    SectionClaudeCode,
    LabelProjectPath,
    SelectProjectFolder,
    LabelCcPrefix,
    BtnCopyCcReport,
    LabelMiniPosition,
    MiniPosCli,
    MiniPosLast,
    MsgNoProject,
    MsgNoLog,
    MsgNoReport,
    SectionBookmarklet,
    LabelTitle,
    BtnCopyTitle,
    BtnCopyCode,
    SectionChatGpt,
    BtnCopyInstructions,
    SectionConfig,
    SectionHelp,
    BtnReadme,
    FirstRunMessage,
    MsgCopied,
    MsgFileNotFound,
    MsgTemplateNotFound,
    FooterVersion,
    HistoryGptToCc,
    HistoryCcToGpt,
    HistoryTitleGpt,
    HistoryTitleCc,
    NoHistory,
    CopiedFromHistory,
    MsgPromptDetected,
    MsgSaveFailed,
    CustomInstructions,
}

/// Localized string lookup
pub trait Translate {
    fn tr(&self, msg: Msg) -> &'static str;
}

impl Translate for Language {
    fn tr(&self, msg: Msg) -> &'static str {
        match self {
            Language::Ja => ja(msg),
            Language::En => en(msg),
        }
    }
}

fn ja(msg: Msg) -> &'static str {
    match msg {
        Msg::WindowTitle => "Bridgiron",
        Msg::SectionClaudeCode => "Claude Code",
        Msg::LabelProjectPath => "プロジェクトパス:",
        Msg::SelectProjectFolder => "プロジェクトフォルダを選択",
        Msg::LabelCcPrefix => "枕文:",
        Msg::BtnCopyCcReport => "CC報告をコピー (Alt+C)",
        Msg::LabelMiniPosition => "ミニウィンドウ位置:",
        Msg::MiniPosCli => "CLIウィンドウ左下",
        Msg::MiniPosLast => "最後の位置",
        Msg::MsgNoProject => "プロジェクトパスが見つかりません",
        Msg::MsgNoLog => "Claude Codeのログが見つかりません",
        Msg::MsgNoReport => "報告が見つかりませんでした",
        Msg::SectionBookmarklet => "ブックマークレット",
        Msg::LabelTitle => "タイトル:",
        Msg::BtnCopyTitle => "タイトルをコピー",
        Msg::BtnCopyCode => "コードをコピー",
        Msg::SectionChatGpt => "ChatGPT設定",
        Msg::BtnCopyInstructions => "カスタム指示文をコピー",
        Msg::SectionConfig => "設定ファイル編集",
        Msg::SectionHelp => "ヘルプ",
        Msg::BtnReadme => "使い方を見る",
        Msg::FirstRunMessage => "まずはReadMeを見てね。",
        Msg::MsgCopied => "コピーしました",
        Msg::MsgFileNotFound => "ファイルが見つかりません: ",
        Msg::MsgTemplateNotFound => "テンプレートファイルが見つかりません",
        Msg::FooterVersion => "Bridgiron v",
        Msg::HistoryGptToCc => "GPT→CC",
        Msg::HistoryCcToGpt => "CC→GPT",
        Msg::HistoryTitleGpt => "GPT→CC履歴",
        Msg::HistoryTitleCc => "CC→GPT履歴",
        Msg::NoHistory => "履歴がありません",
        Msg::CopiedFromHistory => "履歴からコピーしました",
        Msg::MsgPromptDetected => "プロンプトを検知しました",
        Msg::MsgSaveFailed => "保存に失敗しました",
        Msg::CustomInstructions => {
            "Claude Codeに渡すプロンプトを出力する際は、以下のルールに従ってください：\n\
             - プロンプトの直前に「---SOP---」を1行で記載\n\
             - プロンプトの直後に「---EOP---」を1行で記載\n\
             - 1つの発言につき、SOP/EOPのペアは1つまでとする"
        }
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::WindowTitle => "Bridgiron",
        Msg::SectionClaudeCode => "Claude Code",
        Msg::LabelProjectPath => "Project Path:",
        Msg::SelectProjectFolder => "Select Project Folder",
        Msg::LabelCcPrefix => "Prefix:",
        Msg::BtnCopyCcReport => "Copy CC Report (Alt+C)",
        Msg::LabelMiniPosition => "Mini window position:",
        Msg::MiniPosCli => "CLI window bottom-left",
        Msg::MiniPosLast => "Last position",
        Msg::MsgNoProject => "Project path not found",
        Msg::MsgNoLog => "Claude Code log not found",
        Msg::MsgNoReport => "Report not found",
        Msg::SectionBookmarklet => "Bookmarklet",
        Msg::LabelTitle => "Title:",
        Msg::BtnCopyTitle => "Copy Title",
        Msg::BtnCopyCode => "Copy Code",
        Msg::SectionChatGpt => "ChatGPT Settings",
        Msg::BtnCopyInstructions => "Copy Custom Instructions",
        Msg::SectionConfig => "Edit Config Files",
        Msg::SectionHelp => "Help",
        Msg::BtnReadme => "Open Readme",
        Msg::FirstRunMessage => "First of all, please check the ReadMe!",
        Msg::MsgCopied => "Copied",
        Msg::MsgFileNotFound => "File not found: ",
        Msg::MsgTemplateNotFound => "Template file not found",
        Msg::FooterVersion => "Bridgiron v",
        Msg::HistoryGptToCc => "GPT→CC",
        Msg::HistoryCcToGpt => "CC→GPT",
        Msg::HistoryTitleGpt => "GPT→CC History",
        Msg::HistoryTitleCc => "CC→GPT History",
        Msg::NoHistory => "No history",
        Msg::CopiedFromHistory => "Copied from history",
        Msg::MsgPromptDetected => "Prompt detected",
        Msg::MsgSaveFailed => "Failed to save",
        Msg::CustomInstructions => {
            "When you output a prompt for Claude Code, follow these rules:\n\
             - Put \"---SOP---\" on its own line right before the prompt\n\
             - Put \"---EOP---\" on its own line right after the prompt\n\
             - Use at most one SOP/EOP pair per reply"
        }
    }
}
