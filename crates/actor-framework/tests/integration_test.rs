use actor_framework::{ActorEntity, Filter, FrameworkError, MissingPolicy, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct StockBin {
    id: u32,
    code: String,
    units: u32,
    moves: u32,
}

#[derive(Debug)]
struct StockBinCreate {
    code: String,
    units: u32,
}

#[derive(Debug)]
struct StockBinUpdate {
    code: Option<String>,
}

#[derive(Debug)]
enum BinAction {
    Take(u32),
    Put(u32),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum BinError {
    #[error("only {0} units left")]
    Short(u32),
    #[error("code must not be empty")]
    EmptyCode,
}

#[async_trait]
impl ActorEntity for StockBin {
    type Id = u32;
    type Create = StockBinCreate;
    type Update = StockBinUpdate;
    type Action = BinAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BinError;

    fn from_create_params(id: u32, params: StockBinCreate) -> Result<Self, Self::Error> {
        if params.code.is_empty() {
            return Err(BinError::EmptyCode);
        }
        Ok(Self {
            id,
            code: params.code,
            units: params.units,
            moves: 0,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    async fn on_update(
        &mut self,
        update: StockBinUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(code) = update.code {
            self.code = code;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BinAction,
        _ctx: &Self::Context,
    ) -> Result<u32, Self::Error> {
        // counted before validation so a failing action leaves a trace to roll back
        self.moves += 1;
        match action {
            BinAction::Take(n) => {
                if n > self.units {
                    return Err(BinError::Short(self.units));
                }
                self.units -= n;
            }
            BinAction::Put(n) => self.units += n,
        }
        Ok(self.units)
    }
}

fn bin(code: &str, units: u32) -> StockBinCreate {
    StockBinCreate {
        code: code.to_string(),
        units,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(bin("A-01", 5)).await.unwrap();
    assert_eq!(id, 1); // First ID should be 1

    // 2. Action
    let left = client.perform_action(id, BinAction::Take(2)).await.unwrap();
    assert_eq!(left, 3);

    // 3. Update
    let update = StockBinUpdate {
        code: Some("A-02".into()),
    };
    let updated: StockBin = client.update(id, update).await.unwrap();
    assert_eq!(updated.code, "A-02");
    assert_eq!(updated.units, 3);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.perform_action(id, BinAction::Put(1)).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_action_restores_entity() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("B-01", 1)).await.unwrap();
    let err = client
        .perform_action(id, BinAction::Take(4))
        .await
        .unwrap_err();
    assert_eq!(err.downcast_entity::<BinError>().unwrap(), BinError::Short(1));

    let stored: StockBin = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.units, 1);
    assert_eq!(stored.moves, 0, "failed action must not leave partial changes");
}

#[tokio::test]
async fn test_batch_is_all_or_nothing() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    let a = client.create(bin("C-01", 5)).await.unwrap();
    let b = client.create(bin("C-02", 1)).await.unwrap();

    let ops = vec![
        (a, BinAction::Take(2)),
        (a, BinAction::Take(1)),
        (b, BinAction::Take(3)),
    ];
    assert!(client.batch(ops, MissingPolicy::Fail).await.is_err());
    assert_eq!(client.get(a).await.unwrap().unwrap().units, 5);
    assert_eq!(client.get(b).await.unwrap().unwrap().units, 1);

    // Missing ids abort under Fail ...
    let ops = vec![(a, BinAction::Take(1)), (99, BinAction::Take(1))];
    assert!(matches!(
        client.batch(ops, MissingPolicy::Fail).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert_eq!(client.get(a).await.unwrap().unwrap().units, 5);

    // ... and are skipped under Skip.
    let ops = vec![(99, BinAction::Put(1)), (a, BinAction::Put(2))];
    let results = client.batch(ops, MissingPolicy::Skip).await.unwrap();
    assert_eq!(results, vec![None, Some(7)]);
}

#[tokio::test]
async fn test_upsert_creates_only_on_success() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    // Creating then failing the action stores nothing.
    let err = client.upsert(40, bin("D-01", 0), BinAction::Take(1)).await;
    assert!(err.is_err());
    assert!(client.get(40).await.unwrap().is_none());

    let units = client
        .upsert(40, bin("D-01", 0), BinAction::Put(3))
        .await
        .unwrap();
    assert_eq!(units, 3);

    // Existing entity: params are ignored.
    let units = client
        .upsert(40, bin("ignored", 100), BinAction::Put(1))
        .await
        .unwrap();
    assert_eq!(units, 4);
    assert_eq!(client.get(40).await.unwrap().unwrap().code, "D-01");
}

#[tokio::test]
async fn test_unique_key_conflicts() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.create(bin("E-01", 1)).await.unwrap();
    let second = client.create(bin("E-02", 1)).await.unwrap();

    assert!(matches!(
        client.create(bin("E-01", 9)).await,
        Err(FrameworkError::Conflict(key)) if key == "E-01"
    ));

    let clash = StockBinUpdate {
        code: Some("E-01".into()),
    };
    assert!(matches!(
        client.update(second, clash).await,
        Err(FrameworkError::Conflict(_))
    ));
    assert_eq!(client.get(second).await.unwrap().unwrap().code, "E-02");

    // Re-saving its own key is not a clash.
    let same = StockBinUpdate {
        code: Some("E-01".into()),
    };
    assert!(client.update(first, same).await.is_ok());
}

#[tokio::test]
async fn test_query_filters_inside_actor() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    client.create(bin("F-01", 0)).await.unwrap();
    client.create(bin("F-02", 8)).await.unwrap();
    client.create(bin("F-03", 2)).await.unwrap();

    let mut stocked: Vec<String> = client
        .query(Filter::new(|b: &StockBin| b.units > 0))
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.code)
        .collect();
    stocked.sort();
    assert_eq!(stocked, vec!["F-02", "F-03"]);
}

#[tokio::test]
async fn test_create_error_is_typed() {
    let (actor, client) = ResourceActor::<StockBin>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(bin("", 1)).await.unwrap_err();
    assert_eq!(err.downcast_entity::<BinError>().unwrap(), BinError::EmptyCode);
}
