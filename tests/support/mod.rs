#![allow(dead_code)]

use dataforge::config::DataforgeConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WIDGET_CLASS: &str = r#"package client.beans {
    public class WidgetClass extends BaseBean {
        public var count:int;
        private var _a1:String;

        public function get label():String { return _a1; }
    }
}
"#;

pub const CASTLE_BEAN: &str = r#"package client.beans {
    public class CastleBean extends BaseBean {
        public var name:String;
        public var level:int;
        private var _x9:Number;

        public function get coordinates():Number { return _x9; }
        public function upgrade():void {}
    }
}
"#;

pub const ARMY_COMMANDS: &str = r#"package client.commands {
    public class ArmyCommands {
        public function newArmy(castleId:int, heroId:int, count:int = 0):void {
            Sender.send("army.newArmy", [castleId, heroId, count]);
        }
        public function recall(armyId:int):void {
            Sender.send("army.recall", [armyId]);
        }
    }
}
"#;

pub const ERROR_CODES: &str = r#"package client.consts {
    public class ErrorCode {
        public static const OK:int = 0;
        public static const NO_SUCH_CASTLE:int = -12;
        public static const SERVER_BUSY:int = 7;
    }
}
"#;

pub const PROTOCOL_MAPPING: &str = r#"COMMANDS = {
    'quest': ['accept', 'complete', "abandon"],
    'army': ['newArmy'],
}
"#;

/// A source tree on disk plus a separate output directory
pub struct Workspace {
    pub source: TempDir,
    pub output: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            source: TempDir::new().expect("source tempdir"),
            output: TempDir::new().expect("output tempdir"),
        }
    }

    /// Representative corpus: beans, one command family, error codes,
    /// a duplicate variant and the fallback mapping
    pub fn standard() -> Self {
        let ws = Self::new();
        ws.write("beans/WidgetClass.as", WIDGET_CLASS);
        ws.write("beans/CastleBean.as", CASTLE_BEAN);
        ws.write("beans/CastleBean_1.as", "public class CastleBean { public var stale:int; }");
        ws.write("commands/ArmyCommands.as", ARMY_COMMANDS);
        ws.write("consts/ErrorCode.as", ERROR_CODES);
        ws.write("protocol.py", PROTOCOL_MAPPING);
        ws
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.source.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create source dirs");
        }
        fs::write(&path, content).expect("write source file");
        path
    }

    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.source.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create source dirs");
        }
        fs::write(&path, content).expect("write source file");
        path
    }

    pub fn config(&self) -> DataforgeConfig {
        DataforgeConfig::with_dirs(self.source.path(), self.output.path())
    }

    pub fn game_data(&self, file: &str) -> PathBuf {
        self.output.path().join("game_data").join(file)
    }

    pub fn docs(&self, file: &str) -> PathBuf {
        self.output.path().join("documentation").join(file)
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        let text = fs::read_to_string(path).expect("read artifact");
        serde_json::from_str(&text).expect("artifact is valid JSON")
    }
}
