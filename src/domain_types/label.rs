use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("無效的標籤值: {0} (只接受 0 或 1)")]
pub struct LabelError(pub i64);

/// 配對標籤，輸出為 `y` / `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Match,
    NonMatch,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Match => "y",
            Label::NonMatch => "n",
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = LabelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::NonMatch),
            1 => Ok(Label::Match),
            other => Err(LabelError(other)),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
