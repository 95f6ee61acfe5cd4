use std::path::Path;

use log::info;

use fwadmin_error::{FwError, Result};

use crate::config::Config;
use crate::dbconfig::DbConfig;

/// 통합 세팅 인스턴스
pub struct Settings {
    pub server: Config,
    pub database: DbConfig,
}

impl Settings {
    /// Setting 생성
    pub fn new() -> Result<Self> {
        let server = Self::load_server_config()?;
        let database = Self::load_db_config()?;

        Ok(Self {
            server,
            database,
        })
    }

    /// 서버 설정 로드
    fn load_server_config() -> Result<Config> {
        // yml 파일 유무 확인
        if Path::new("config.yml").exists() {
            info!("서버 설정파일 로드: config.yml");
            match Config::from_file("config.yml") {
                Ok(config) => Ok(config),
                Err(e) => {
                    Err(FwError::Config(format!("서버 설정파일 로드 실패: {}", e)))
                }
            }
        } else {
            // 기본설정사용
            info!("서버 기본설정 사용");
            Ok(Config::new())
        }
    }

    /// db 설정 로드
    fn load_db_config() -> Result<DbConfig> {
        // yml 파일 유무 확인
        if Path::new("db.yml").exists() {
            info!("DB 설정파일 로드: db.yml");
            match DbConfig::from_file("db.yml") {
                Ok(config) => Ok(config),
                Err(e) => {
                    Err(FwError::Config(format!("DB 설정파일 로드 실패: {}", e)))
                }
            }
        } else {
            // 기본설정사용
            info!("DB 기본설정 사용");
            Ok(DbConfig::default())
        }
    }
}
