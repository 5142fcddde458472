use docket_core::config::AppConfig;
use docket_core::filter::Filter;
use docket_core::prefs::{
  ColorScheme,
  Language,
  PaletteChannel,
  Theme
};
use docket_core::{
  Action,
  MemoryStore,
  Session,
  Slot
};

fn fresh() -> Session<MemoryStore> {
  Session::bootstrap(
    MemoryStore::new(),
    &AppConfig::default(),
    Some("en-US"),
    ColorScheme::Light
  )
}

fn reload(
  session: Session<MemoryStore>
) -> Session<MemoryStore> {
  let store =
    session.persistence().store().clone();
  Session::bootstrap(
    store,
    &AppConfig::default(),
    Some("en-US"),
    ColorScheme::Light
  )
}

fn add_all(
  session: &mut Session<MemoryStore>,
  titles: &[&str]
) -> Vec<String> {
  for title in titles {
    session
      .handle(Action::Add(title.to_string()));
  }
  session
    .tasks()
    .iter()
    .map(|task| task.id.clone())
    .collect()
}

fn writes(
  session: &Session<MemoryStore>
) -> usize {
  session.persistence().store().writes()
}

#[test]
fn add_trims_and_skips_blank_titles() {
  let mut s = fresh();
  add_all(&mut s, &["older"]);

  let outcome = s.handle(Action::Add(
    "  Buy milk  ".to_string()
  ));
  assert_eq!(outcome.persisted, vec![
    Slot::Tasks
  ]);
  assert_eq!(s.tasks().len(), 2);
  assert_eq!(s.tasks()[0].title, "Buy milk");
  assert!(!s.tasks()[0].completed);

  let before = s.tasks().to_vec();
  let outcome =
    s.handle(Action::Add("   ".to_string()));
  assert!(outcome.is_noop());
  assert_eq!(s.tasks(), before.as_slice());
}

#[test]
fn toggle_edit_delete_flow() {
  let mut s = fresh();
  let ids = add_all(&mut s, &["c", "b", "a"]);
  // newest first: a, b, c
  let (a, b) = (ids[0].clone(), ids[1].clone());

  s.handle(Action::Toggle(a.clone()));
  s.handle(Action::Toggle(a.clone()));
  assert!(!s.tasks()[0].completed);

  let before = s.tasks().to_vec();
  assert!(
    s.handle(Action::Toggle(
      "missing".to_string()
    ))
    .is_noop()
  );
  assert_eq!(s.tasks(), before.as_slice());

  s.handle(Action::Toggle(b.clone()));
  s.handle(Action::Edit {
    id:    b.clone(),
    title: " beta ".to_string()
  });
  let edited = &s.tasks()[1];
  assert_eq!(edited.id, b);
  assert_eq!(edited.title, "beta");
  assert!(edited.completed);

  s.handle(Action::Edit {
    id:    a.clone(),
    title: "   ".to_string()
  });
  assert_eq!(s.tasks().len(), 2);
  assert!(
    s.tasks().iter().all(|task| task.id != a)
  );

  s.handle(Action::Delete(b.clone()));
  assert_eq!(s.tasks().len(), 1);
  assert_eq!(s.tasks()[0].title, "c");
}

#[test]
fn clear_completed_without_completed_tasks_writes_nothing()
{
  let mut s = fresh();
  let ids =
    add_all(&mut s, &["d", "c", "b", "a"]);
  let snapshot = s
    .persistence()
    .store()
    .raw(&AppConfig::default().storage.tasks)
    .map(str::to_string);
  let writes_before = writes(&s);

  assert!(
    s.handle(Action::ClearCompleted)
      .is_noop()
  );
  assert_eq!(writes(&s), writes_before);
  assert_eq!(
    s.persistence()
      .store()
      .raw(&AppConfig::default().storage.tasks)
      .map(str::to_string),
    snapshot
  );

  s.handle(Action::Toggle(ids[1].clone()));
  s.handle(Action::Toggle(ids[3].clone()));
  s.handle(Action::ClearCompleted);
  let titles: Vec<&str> = s
    .tasks()
    .iter()
    .map(|task| task.title.as_str())
    .collect();
  assert_eq!(titles, vec!["a", "c"]);
}

#[test]
fn projection_partitions_the_sequence() {
  let mut s = fresh();
  let ids =
    add_all(&mut s, &["e", "d", "c", "b", "a"]);
  s.handle(Action::Toggle(ids[1].clone()));
  s.handle(Action::Toggle(ids[4].clone()));

  let collect = |s: &Session<MemoryStore>| {
    s.visible()
      .map(|task| task.id.clone())
      .collect::<Vec<_>>()
  };

  let all = collect(&s);
  assert_eq!(all, ids);

  s.handle(Action::SetFilter(Filter::Active));
  let active = collect(&s);
  s.handle(Action::SetFilter(
    Filter::Completed
  ));
  let completed = collect(&s);

  assert_eq!(active, vec![
    ids[0].clone(),
    ids[2].clone(),
    ids[3].clone()
  ]);
  assert_eq!(completed, vec![
    ids[1].clone(),
    ids[4].clone()
  ]);
  assert!(
    active
      .iter()
      .all(|id| !completed.contains(id))
  );
  assert_eq!(
    active.len() + completed.len(),
    all.len()
  );
  assert_eq!(s.active_count(), 3);
}

#[test]
fn reorder_only_in_unfiltered_view() {
  let mut s = fresh();
  let ids = add_all(&mut s, &["c", "b", "a"]);
  let (a, b, c) =
    (ids[0].clone(), ids[1].clone(), ids[2].clone());

  s.handle(Action::SetFilter(Filter::Active));
  let outcome = s.handle(Action::Reorder(vec![
    c.clone(),
    a.clone(),
    b.clone(),
  ]));
  assert!(outcome.is_noop());
  assert_eq!(
    s.tasks()
      .iter()
      .map(|task| task.id.clone())
      .collect::<Vec<_>>(),
    ids
  );

  s.handle(Action::SetFilter(Filter::All));
  let outcome = s.handle(Action::Reorder(vec![
    c.clone(),
    a.clone(),
    b.clone(),
  ]));
  assert_eq!(outcome.persisted, vec![
    Slot::Tasks
  ]);

  let reloaded = reload(s);
  assert_eq!(
    reloaded
      .tasks()
      .iter()
      .map(|task| task.id.clone())
      .collect::<Vec<_>>(),
    vec![c, a, b]
  );
}

#[test]
fn preferences_survive_reload() {
  let mut s = fresh();
  add_all(&mut s, &["keep me"]);
  s.handle(Action::SetTheme(
    "custom".to_string()
  ));
  s.handle(Action::SetCustomChannel {
    channel: PaletteChannel::Primary,
    value:   "#ff00aa".to_string()
  });
  s.handle(Action::SetLanguage(
    "de".to_string()
  ));
  let tasks = s.tasks().to_vec();
  let palette = s.palette().clone();

  let s = reload(s);
  assert_eq!(s.tasks(), tasks.as_slice());
  assert_eq!(s.theme(), Theme::Custom);
  assert_eq!(s.palette(), &palette);
  assert_eq!(s.language(), Language::De);
  assert!(!s.modal().is_open());
}

#[test]
fn corrupt_slots_fall_back_to_defaults() {
  let keys = AppConfig::default().storage;
  let store = MemoryStore::new()
    .with_item(&keys.tasks, "[{\"id\": ")
    .with_item(&keys.theme, "{}")
    .with_item(&keys.palette, "not json")
    .with_item(&keys.language, "klingon");

  let s = Session::bootstrap(
    store,
    &AppConfig::default(),
    None,
    ColorScheme::Dark
  );
  assert!(s.tasks().is_empty());
  assert_eq!(s.theme(), Theme::System);
  assert!(s.palette().is_empty());
  assert_eq!(s.language(), Language::En);
  assert_eq!(
    s.theme_plan().color_scheme,
    ColorScheme::Dark
  );
}

#[test]
fn spanish_relabels_everything() {
  let mut s = fresh();
  add_all(&mut s, &["uno", "dos"]);
  s.handle(Action::SetLanguage(
    "es".to_string()
  ));

  let labels = s.labels();
  assert_eq!(labels.title, "Tareas");
  assert_eq!(labels.clear_completed, "Borrar completadas");
  assert_eq!(labels.filter(Filter::All), "Todas");
  assert_eq!(s.items_left_text(), "2 activas");

  s.handle(Action::SetLanguage(
    "tlh".to_string()
  ));
  assert_eq!(s.language(), Language::En);
  assert_eq!(s.labels().title, "Tasks");
  assert_eq!(s.items_left_text(), "2 active");
}

#[test]
fn write_failures_keep_memory_state() {
  let mut s = fresh();
  s.persistence_mut()
    .store_mut()
    .set_fail_writes(true);

  let added = s
    .handle(Action::Add("offline".to_string()));
  assert!(added.rerender);
  assert!(added.persisted.is_empty());

  let themed = s.handle(Action::SetTheme(
    "dark".to_string()
  ));
  assert!(themed.rerender);
  assert!(themed.persisted.is_empty());

  let recolored =
    s.handle(Action::SetCustomChannel {
      channel: PaletteChannel::Bg,
      value:   "#000".to_string()
    });
  assert!(recolored.persisted.is_empty());

  assert_eq!(s.tasks().len(), 1);
  assert_eq!(s.theme(), Theme::Dark);
  assert_eq!(writes(&s), 0);

  let reloaded = reload(s);
  assert!(reloaded.tasks().is_empty());
  assert_eq!(reloaded.theme(), Theme::System);
}
