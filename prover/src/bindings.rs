//! OP Stack contracts touched while proving a withdrawal.

use alloy::sol;

sol! {
    /// Low-level withdrawal committed to by `L2ToL1MessagePasser`.
    struct WithdrawalTransaction {
        uint256 nonce;
        address sender;
        address target;
        uint256 value;
        uint256 gasLimit;
        bytes data;
    }

    struct OutputRootProof {
        bytes32 version;
        bytes32 stateRoot;
        bytes32 messagePasserStorageRoot;
        bytes32 latestBlockhash;
    }

    #[sol(rpc)]
    interface IOptimismPortal2 {
        function disputeGameFactory() external view returns (address);

        function respectedGameType() external view returns (uint32);

        function proveWithdrawalTransaction(
            WithdrawalTransaction calldata _tx,
            uint256 _disputeGameIndex,
            OutputRootProof calldata _outputRootProof,
            bytes[] calldata _withdrawalProof
        ) external;
    }

    #[sol(rpc)]
    interface IDisputeGameFactory {
        struct GameSearchResult {
            uint256 index;
            bytes32 metadata;
            uint64 timestamp;
            bytes32 rootClaim;
            bytes extraData;
        }

        function gameCount() external view returns (uint256 gameCount_);

        function findLatestGames(uint32 _gameType, uint256 _start, uint256 _n)
            external view returns (GameSearchResult[] memory games_);
    }

    interface ICrossDomainMessenger {
        function relayMessage(
            uint256 nonce,
            address sender,
            address target,
            uint256 value,
            uint256 minGasLimit,
            bytes message
        ) external payable;
    }

    /// Standard bridge finalization, the ETH amount of a bridge message is taken from it.
    interface IL1StandardBridge {
        function finalizeETHWithdrawal(
            address from,
            address to,
            uint256 amount,
            bytes extraData
        ) external payable;
    }
}
