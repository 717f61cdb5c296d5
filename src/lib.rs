//! 미술 사조 하이브리드 분석기
//!
//! Oracle(생성형 비전 모델) 두 번, 로컬 분류 모델 두 번의 예측을 모아
//! 투표로 사조를 정하고 어휘사전으로 설명문을 매칭한다.
//! 순수 로직은 `art_school_common`에 있고, 이 크레이트는 I/O와 외부 호출을 맡는다.

pub mod analyzer;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod oracle;
pub mod scanner;
pub mod schools;
pub mod uploads;
