use anyhow::anyhow;
use docket_core::KeyValueStore;

/// `window.localStorage` as a durable
/// store. Every call looks the storage up
/// again, so a browser that disables it
/// mid-session only loses persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .ok_or_else(|| anyhow!("no window"))?
    .local_storage()
    .map_err(|err| {
      anyhow!(
        "local storage unavailable: \
         {err:?}"
      )
    })?
    .ok_or_else(|| {
      anyhow!("local storage disabled")
    })
}

impl KeyValueStore for BrowserStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(key)
      .map_err(|err| {
        anyhow!(
          "failed reading {key}: {err:?}"
        )
      })
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(key, value)
      .map_err(|err| {
        anyhow!(
          "failed writing {key}: {err:?}"
        )
      })
  }
}

pub fn browser_locale() -> Option<String> {
  web_sys::window().and_then(|window| {
    window.navigator().language()
  })
}
