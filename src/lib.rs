//! usermgmt-server: ユーザー管理 HTTP サービス。
//!
//! Google ID トークンの検証、セッショントークンの発行・検証、
//! ユーザーの登録・プロフィール更新を提供する。

pub mod adapter;
pub mod domain;
pub mod infrastructure;
pub mod usecase;
